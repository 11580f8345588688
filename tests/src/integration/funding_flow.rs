//! # Funding Flow
//!
//! A proposer sends a channel proposal to every other participant over its
//! peer connection. Each participant funds its share independently on a
//! shared ledger and waits until the channel is fully funded.
//!
//! ```text
//! proposer ──Proposal──► Peer ──► Receiver ──► participant task
//!     │                                           │
//!     └──────── fund ──► InMemoryLedger ◄── fund ─┘
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, WireMsg};
    use anyhow::{bail, Context as _};
    use sc_01_channel_backend::{channel_id, EthereumBackend};
    use sc_02_funding::{ChannelFunder, Funder, FunderConfig, FundingError, InMemoryLedger, Stage};
    use shared_bus::{Category, Peer, Receiver};
    use shared_crypto::Account;
    use shared_types::{ChannelId, Context, FundingRequest, U256};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tracing::Instrument;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn funder(ledger: &Arc<InMemoryLedger>) -> Arc<Funder<InMemoryLedger>> {
        Arc::new(Funder::new(
            Arc::clone(ledger),
            EthereumBackend::new(),
            vec![fixtures::ether()],
            FunderConfig {
                poll_interval: Duration::from_millis(5),
            },
        ))
    }

    /// Wait for a proposal, then fund it as participant `idx`.
    async fn participant(
        idx: usize,
        receiver: Arc<Receiver<WireMsg>>,
        funder: Arc<Funder<InMemoryLedger>>,
    ) -> anyhow::Result<ChannelId> {
        let tuple = receiver
            .next()
            .await
            .context("connection closed before the proposal")?;
        let WireMsg::Proposal { params, allocation } = &*tuple.msg else {
            bail!("expected a proposal, got {:?}", tuple.msg);
        };

        let id = channel_id(params);
        let request = FundingRequest::new(Arc::clone(params), Arc::clone(allocation), idx);
        let span = sc_telemetry::channel_span!("fund", id, participant = idx);
        let ctx = Context::with_timeout(Duration::from_secs(10));

        funder.fund(&ctx, &request).instrument(span.clone()).await?;
        funder.await_funded(&ctx, &request).instrument(span).await?;
        Ok(id)
    }

    async fn run_funding(balances: &[u64]) -> anyhow::Result<()> {
        fixtures::init_logging();
        let n = balances.len();
        let accounts = fixtures::accounts(n);
        let (params, allocation) = fixtures::proposal(&accounts, balances);
        let id = channel_id(&params);

        let ledger = Arc::new(
            InMemoryLedger::with_registry().with_latency(Duration::from_millis(1)),
        );
        ledger.register_channel(id, params.participants.clone());

        // One connection from the proposer to every other participant.
        let mut tasks = Vec::new();
        let mut peers = Vec::new();
        for idx in 1..n {
            let peer = Arc::new(Peer::new(accounts[0].address()));
            let receiver = Receiver::new(4);
            peer.subscribe(Category::ChannelProposal, &receiver).await?;
            tasks.push(tokio::spawn(participant(idx, receiver, funder(&ledger))));
            peers.push(peer);
        }

        for peer in &peers {
            let transport = tokio_stream::iter(vec![
                Ok::<_, String>(WireMsg::Ping(1)),
                Ok(WireMsg::Proposal {
                    params: Arc::clone(&params),
                    allocation: Arc::clone(&allocation),
                }),
            ]);
            peer.serve(transport).await?;
        }

        // The proposer funds too.
        let own = FundingRequest::new(Arc::clone(&params), Arc::clone(&allocation), 0);
        let ctx = Context::with_timeout(Duration::from_secs(10));
        let proposer = funder(&ledger);
        proposer.fund(&ctx, &own).await?;
        proposer.await_funded(&ctx, &own).await?;

        for task in tasks {
            assert_eq!(task.await??, id);
        }

        let total: u64 = balances.iter().sum();
        let holder = fixtures::ether().holder();
        assert_eq!(ledger.total_deposited(id, holder), U256::from(total));
        for (account, balance) in accounts.iter().zip(balances) {
            assert_eq!(
                ledger.holdings(id, holder, account.address()),
                U256::from(*balance)
            );
        }
        Ok(())
    }

    // =============================================================================
    // INTEGRATION TESTS: PROPOSAL → CONCURRENT FUNDING
    // =============================================================================

    #[tokio::test]
    async fn test_two_party_channel_is_funded() -> anyhow::Result<()> {
        run_funding(&[100, 50]).await
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_ten_party_channel_is_funded() -> anyhow::Result<()> {
        let balances: Vec<u64> = (0..10).map(|_| rand::random::<u64>() % 999 + 1).collect();
        run_funding(&balances).await
    }

    #[tokio::test]
    async fn test_zero_share_participant_still_sees_channel_funded() -> anyhow::Result<()> {
        run_funding(&[10, 0, 5]).await
    }

    /// A failed deposit leaves the channel underfunded until the participant
    /// retries with the same request.
    #[tokio::test]
    async fn test_failed_deposit_is_retried() -> anyhow::Result<()> {
        fixtures::init_logging();
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[30, 20]);
        let ledger = Arc::new(InMemoryLedger::new());
        let alice = funder(&ledger);
        let bob = funder(&ledger);
        let reqs: Vec<_> = (0..2)
            .map(|i| FundingRequest::new(Arc::clone(&params), Arc::clone(&allocation), i))
            .collect();

        let ctx = Context::with_timeout(Duration::from_secs(5));
        alice.fund(&ctx, &reqs[0]).await?;

        ledger.fail_next_deposits(1, "replacement transaction underpriced");
        let err = bob.fund(&ctx, &reqs[1]).await.unwrap_err();
        assert!(matches!(
            err,
            FundingError::TransactionFailed {
                asset: 0,
                stage: Stage::Deposit,
                ..
            }
        ));
        assert!(err.is_retryable());

        let short = Context::with_timeout(Duration::from_millis(30));
        assert!(matches!(
            alice.await_funded(&short, &reqs[0]).await,
            Err(FundingError::Timeout { .. })
        ));

        bob.fund(&ctx, &reqs[1]).await?;
        timeout(Duration::from_secs(1), alice.await_funded(&ctx, &reqs[0])).await??;

        let id = channel_id(&params);
        assert_eq!(
            ledger.total_deposited(id, fixtures::ether().holder()),
            U256::from(50)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_proposal_for_unregistered_channel_fails_validation() {
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 1]);
        let ledger = Arc::new(InMemoryLedger::with_registry());

        let req = FundingRequest::new(params, allocation, 1);
        let err = funder(&ledger)
            .fund(&Context::background(), &req)
            .await
            .unwrap_err();
        assert!(matches!(err, FundingError::Validation { .. }));
        assert!(!err.is_retryable());
        assert_eq!(ledger.submissions(), 0);
    }
}
