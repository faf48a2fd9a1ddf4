/// First `https://` URL in `line`, cut at whitespace or quotes.
pub(crate) fn extract_url_from_line(line: &str) -> Option<String> {
    let start = line.find("https://")?;
    let url_part = &line[start..];
    let end = url_part
        .find(|c: char| c.is_whitespace() || c == '"' || c == '\'')
        .unwrap_or(url_part.len());

    let url = url_part[..end].trim_end_matches('/');
    (url.len() > "https://".len() + 3).then(|| url.to_string())
}

/// localhost.run prints a welcome text with several links; only the
/// assigned tunnel host is wanted.
pub(crate) fn localhost_run_url(text: &str) -> Option<String> {
    text.lines()
        .filter_map(extract_url_from_line)
        .find(|url| {
            !url.contains("admin.localhost.run")
                && !url.contains("localhost.run/docs")
                && (url.contains(".lhr.life") || url.contains(".localhost.run"))
        })
}

pub(crate) fn cloudflare_url(line: &str) -> Option<String> {
    extract_url_from_line(line).filter(|url| url.contains("trycloudflare.com"))
}

/// Matches the agent's `started tunnel ... url=https://...` log line.
pub(crate) fn ngrok_url(line: &str) -> Option<String> {
    if !line.contains("started tunnel") {
        return None;
    }
    extract_url_from_line(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url_from_line() {
        assert_eq!(
            extract_url_from_line("  visit \"https://abc.example.com/\" now"),
            Some("https://abc.example.com".to_string())
        );
        assert_eq!(extract_url_from_line("http://plain.example.com"), None);
        assert_eq!(extract_url_from_line("https://"), None);
    }

    #[test]
    fn test_localhost_run_url() {
        let banner = "Welcome to localhost.run!\n\
            Follow your favourite reverse tunnel at https://twitter.com/localhost_run.\n\
            https://admin.localhost.run/\n\
            a1b2c3d4e5.lhr.life tunneled with tls termination, https://a1b2c3d4e5.lhr.life\n";

        assert_eq!(
            localhost_run_url(banner),
            Some("https://a1b2c3d4e5.lhr.life".to_string())
        );
        assert_eq!(localhost_run_url("https://admin.localhost.run/"), None);
    }

    #[test]
    fn test_cloudflare_url() {
        let line = "2024-01-01T00:00:00Z INF |  https://quiet-river-1234.trycloudflare.com  |";
        assert_eq!(
            cloudflare_url(line),
            Some("https://quiet-river-1234.trycloudflare.com".to_string())
        );
        assert_eq!(
            cloudflare_url("INF Thank you for trying https://developers.cloudflare.com"),
            None
        );
    }

    #[test]
    fn test_ngrok_url() {
        let line = "t=2024-01-01T00:00:00+0000 lvl=info msg=\"started tunnel\" obj=tunnels \
            name=command_line addr=http://localhost:8080 url=https://1234-abcd.ngrok-free.app";
        assert_eq!(
            ngrok_url(line),
            Some("https://1234-abcd.ngrok-free.app".to_string())
        );
        assert_eq!(
            ngrok_url("lvl=warn msg=\"update available\" url=https://ngrok.com/download"),
            None
        );
    }
}
