use super::agent::AgentPublisher;
use super::localhost_run::LocalhostRunPublisher;
use super::models::TunnelPublisher;
use filedock_config::TunnelProvider;
use std::time::Duration;

pub fn publisher_for(provider: TunnelProvider, timeout: Duration) -> Box<dyn TunnelPublisher> {
    match provider {
        TunnelProvider::LocalhostRun => Box::new(LocalhostRunPublisher::new(timeout)),
        TunnelProvider::Cloudflare => Box::new(AgentPublisher::cloudflare(timeout)),
        TunnelProvider::Ngrok => Box::new(AgentPublisher::ngrok(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publisher_for() {
        let timeout = Duration::from_secs(5);
        assert_eq!(publisher_for(TunnelProvider::LocalhostRun, timeout).provider(), "localhost.run");
        assert_eq!(publisher_for(TunnelProvider::Cloudflare, timeout).provider(), "Cloudflare");
        assert_eq!(publisher_for(TunnelProvider::Ngrok, timeout).provider(), "ngrok");
    }
}
