//! UseCase: client connection.
//!
//! Registers the connection, then immediately pushes the current full state
//! to it. Both steps run under the shared event gate, so the first message
//! a new client receives is always a complete, current snapshot: never a
//! stale default and never a partial diff.

use std::sync::Arc;

use maku_shared::protocol::Envelope;
use maku_shared::time::now_millis;

use crate::domain::{ClientId, MessagePusher, PusherChannel, RegistryError, StateStore, Timestamp};

use super::error::ConnectError;
use super::EventGate;

pub struct ConnectClientUseCase {
    store: Arc<dyn StateStore>,
    pusher: Arc<dyn MessagePusher>,
    gate: EventGate,
}

impl ConnectClientUseCase {
    pub fn new(store: Arc<dyn StateStore>, pusher: Arc<dyn MessagePusher>, gate: EventGate) -> Self {
        Self {
            store,
            pusher,
            gate,
        }
    }

    /// Register a connection and queue its initial snapshot.
    ///
    /// Returns the connection timestamp on success. On failure the
    /// connection is not (or no longer) registered.
    pub async fn execute(
        &self,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let _serial = self.gate.lock().await;

        let connected_at = Timestamp::new(now_millis());
        self.pusher
            .register_client(client_id.clone(), connected_at, sender)
            .await
            .map_err(|e| match e {
                RegistryError::DuplicateClientId(id) => ConnectError::DuplicateClientId(id),
            })?;

        let snapshot = self.store.snapshot().await;
        let encoded = Envelope::State(snapshot).encode();
        if let Err(e) = self.pusher.push_to(&client_id, &encoded).await {
            // The channel died before the socket was even up. Make sure no
            // stale handle stays registered, then report the failure.
            self.pusher.unregister_client(&client_id).await;
            return Err(ConnectError::SnapshotDeliveryFailed(e.to_string()));
        }

        tracing::info!("client '{}' connected, initial snapshot queued", client_id);
        Ok(connected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockMessagePusher, MockStateStore, Room};
    use crate::infrastructure::{InMemoryStateStore, WebSocketMessagePusher};
    use crate::usecase::event_gate;
    use maku_shared::protocol::RoomState;
    use tokio::sync::{mpsc, Mutex};

    fn client_id(value: &str) -> ClientId {
        ClientId::new(value.to_string()).unwrap()
    }

    fn real_usecase() -> ConnectClientUseCase {
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        ConnectClientUseCase::new(
            Arc::new(InMemoryStateStore::new(room)),
            Arc::new(WebSocketMessagePusher::new()),
            event_gate(),
        )
    }

    #[tokio::test]
    async fn test_connect_queues_initial_snapshot() {
        // テスト項目: 接続直後のクライアントが最初に受け取るのは現在状態の完全なスナップショット
        // given (前提条件):
        let usecase = real_usecase();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(client_id("viewer-1"), tx).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let first = rx.recv().await.unwrap();
        assert_eq!(
            Envelope::decode(&first).unwrap(),
            Envelope::State(RoomState::default())
        );
    }

    #[tokio::test]
    async fn test_connect_duplicate_id_is_rejected() {
        // テスト項目: 接続中の id と同じ id での接続は拒否される
        // given (前提条件):
        let usecase = real_usecase();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        usecase.execute(client_id("viewer-1"), tx1).await.unwrap();

        // when (操作):
        let result = usecase.execute(client_id("viewer-1"), tx2).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConnectError::DuplicateClientId("viewer-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_connect_with_dead_channel_leaves_no_registration() {
        // テスト項目: スナップショット送信に失敗した接続は登録されずに終わる
        // given (前提条件):
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectClientUseCase::new(
            Arc::new(InMemoryStateStore::new(room)),
            pusher.clone(),
            event_gate(),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // when (操作):
        let result = usecase.execute(client_id("viewer-1"), tx).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ConnectError::SnapshotDeliveryFailed(_))
        ));
        assert!(pusher.connected_clients().await.is_empty());
    }

    #[tokio::test]
    async fn test_connect_registers_before_sending_snapshot() {
        // テスト項目: 登録 → スナップショット送信の順序で実行される
        // given (前提条件):
        let mut store = MockStateStore::new();
        store
            .expect_snapshot()
            .times(1)
            .returning(RoomState::default);

        let mut seq = mockall::Sequence::new();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_register_client()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        pusher
            .expect_push_to()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|_, content| content.contains(r#""type":"state""#))
            .returning(|_, _| Ok(()));

        let usecase =
            ConnectClientUseCase::new(Arc::new(store), Arc::new(pusher), event_gate());
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(client_id("viewer-1"), tx).await;

        // then (期待する結果): モックの期待（回数と順序）が満たされる
        assert!(result.is_ok());
    }
}
