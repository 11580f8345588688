//! # State Signing Flow
//!
//! A participant signs a channel state and sends it as an update. The
//! receiving side verifies the signature against the connection's peer
//! address.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, WireMsg};
    use sc_01_channel_backend::{channel_id, BackendError, ChannelBackend, EthereumBackend};
    use shared_bus::{Category, Peer, Receiver};
    use shared_crypto::Account;
    use shared_types::{Allocation, ChannelId, State};
    use std::sync::Arc;

    fn initial_state(allocation: &Allocation, id: ChannelId) -> State {
        State::initial(id, allocation.clone(), vec![0xCA, 0xFE])
    }

    #[tokio::test]
    async fn test_signed_update_verifies_at_receiver() -> anyhow::Result<()> {
        fixtures::init_logging();
        let backend = EthereumBackend::new();
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[7, 3]);
        let state = initial_state(&allocation, channel_id(&params));

        // Bob's end of the connection to Alice.
        let peer = Peer::new(accounts[0].address());
        let updates = Receiver::new(4);
        peer.subscribe(Category::ChannelUpdate, &updates).await?;

        let signature = backend.sign(&accounts[0], &params, &state)?;
        let delivered = peer
            .dispatch(WireMsg::Update {
                state: state.clone(),
                signature,
            })
            .await;
        assert_eq!(delivered, 1);

        let tuple = updates.next().await.expect("update delivered");
        let WireMsg::Update { state, signature } = &*tuple.msg else {
            panic!("expected an update, got {:?}", tuple.msg);
        };
        assert!(backend.verify(&tuple.peer, &params, state, signature)?);
        assert!(!backend.verify(&accounts[1].address(), &params, state, signature)?);

        let mut forged = state.clone();
        forged.allocation.balances.swap(0, 1);
        assert!(!backend.verify(&tuple.peer, &params, &forged, signature)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_participant_signature_verifies() -> anyhow::Result<()> {
        let backend = EthereumBackend::new();
        let accounts = fixtures::accounts(3);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 2, 3]);
        let mut state = initial_state(&allocation, backend.channel_id(&params));
        state.version = 5;
        state.is_final = true;

        for signer in &accounts {
            let sig = backend.sign(signer, &params, &state)?;
            for other in &accounts {
                assert_eq!(
                    backend.verify(&other.address(), &params, &state, &sig)?,
                    other.address() == signer.address()
                );
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_state_of_other_channel_is_not_signed() {
        let backend = EthereumBackend::new();
        let accounts = fixtures::accounts(2);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 1]);
        let (other, _) = fixtures::proposal(&accounts, &[1, 1]);
        let state = initial_state(&allocation, channel_id(&other));

        assert!(matches!(
            backend.sign(&accounts[0], &params, &state),
            Err(BackendError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_updates_from_two_peers_stay_separate() -> anyhow::Result<()> {
        let backend = EthereumBackend::new();
        let accounts = fixtures::accounts(3);
        let (params, allocation) = fixtures::proposal(&accounts, &[1, 1, 1]);
        let state = initial_state(&allocation, channel_id(&params));

        let updates = Receiver::new(8);
        let peers: Vec<_> = accounts[1..]
            .iter()
            .map(|a| Arc::new(Peer::new(a.address())))
            .collect();
        for peer in &peers {
            peer.subscribe(Category::ChannelUpdate, &updates).await?;
        }

        for (peer, account) in peers.iter().zip(&accounts[1..]) {
            let signature = backend.sign(account, &params, &state)?;
            peer.dispatch(WireMsg::Update {
                state: state.clone(),
                signature,
            })
            .await;
        }

        for _ in 0..2 {
            let tuple = updates.next().await.expect("update delivered");
            let WireMsg::Update { state, signature } = &*tuple.msg else {
                panic!("expected an update");
            };
            assert!(backend.verify(&tuple.peer, &params, state, signature)?);
        }
        Ok(())
    }
}
