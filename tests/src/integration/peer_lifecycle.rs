//! # Peer Lifecycle
//!
//! Connection teardown as seen by the tasks that consume a peer's messages.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, WireMsg};
    use shared_bus::{Category, DispatchConfig, DispatchError, Peer, Receiver};
    use shared_crypto::Account;
    use shared_types::Context;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    /// Count proposals until the receiver is closed.
    async fn drain(receiver: Arc<Receiver<WireMsg>>) -> usize {
        let mut proposals = 0;
        while let Some(tuple) = receiver.next().await {
            if matches!(*tuple.msg, WireMsg::Proposal { .. }) {
                proposals += 1;
            }
        }
        proposals
    }

    #[tokio::test]
    async fn test_transport_failure_releases_consumers() -> anyhow::Result<()> {
        fixtures::init_logging();
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 1]);
        let peer = Arc::new(Peer::new(accounts[0].address()));
        let receiver = Receiver::from_config(&DispatchConfig::default());
        peer.subscribe(Category::ChannelProposal, &receiver).await?;
        let consumer = tokio::spawn(drain(Arc::clone(&receiver)));

        let transport = tokio_stream::iter(vec![
            Ok(WireMsg::Proposal {
                params,
                allocation,
            }),
            Err("connection reset by peer"),
        ]);
        assert_eq!(
            peer.serve(transport).await,
            Err(DispatchError::Transport("connection reset by peer".into()))
        );

        assert_eq!(timeout(Duration::from_secs(1), consumer).await??, 1);
        assert!(peer.is_closed().await);
        assert!(peer.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_unsubscribed_consumer_misses_later_messages() -> anyhow::Result<()> {
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 1]);
        let peer = Peer::new(accounts[0].address());
        let receiver = Receiver::new(4);
        peer.subscribe(Category::ChannelProposal, &receiver).await?;

        let proposal = WireMsg::Proposal {
            params,
            allocation,
        };
        assert_eq!(peer.dispatch(proposal.clone()).await, 1);
        peer.unsubscribe(Category::ChannelProposal, &receiver).await;
        assert!(peer.is_empty().await);
        assert_eq!(peer.dispatch(proposal).await, 0);

        peer.close().await;
        assert_eq!(drain(receiver).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_slow_consumer_bounds_dispatch() -> anyhow::Result<()> {
        let accounts = fixtures::accounts(1);
        let peer = Peer::new(accounts[0].address());
        let receiver = Receiver::new(1);
        peer.subscribe(Category::Control, &receiver).await?;

        let ctx = Context::with_timeout(Duration::from_millis(50));
        assert_eq!(peer.dispatch_within(&ctx, WireMsg::Ping(1)).await, Ok(1));
        assert_eq!(
            peer.dispatch_within(&ctx, WireMsg::Ping(2)).await,
            Err(DispatchError::Timeout)
        );

        // The queued message is intact; the aborted one was never queued.
        assert!(matches!(*receiver.next().await.expect("queued").msg, WireMsg::Ping(1)));
        assert!(receiver.try_next().is_none());
        Ok(())
    }
}
