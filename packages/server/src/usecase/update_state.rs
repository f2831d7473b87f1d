//! UseCase: state update.
//!
//! The core of the hub: merge an inbound patch into the room state and fan
//! the resulting full snapshot out to every registered connection, the
//! sender included. Client state always derives from the hub, never from
//! optimistic local mutation, so the sender is never skipped.

use std::sync::Arc;

use maku_shared::protocol::{Envelope, RoomState, UpdatePatch};

use crate::domain::{MessagePusher, StateStore};

use super::EventGate;

pub struct UpdateStateUseCase {
    store: Arc<dyn StateStore>,
    pusher: Arc<dyn MessagePusher>,
    gate: EventGate,
}

impl UpdateStateUseCase {
    pub fn new(store: Arc<dyn StateStore>, pusher: Arc<dyn MessagePusher>, gate: EventGate) -> Self {
        Self {
            store,
            pusher,
            gate,
        }
    }

    /// Merge the patch and broadcast the merged snapshot.
    ///
    /// Infallible: the merge accepts any object-shaped patch, and per-
    /// connection send failures are handled inside the registry by dropping
    /// the dead connection. Returns the merged state.
    pub async fn execute(&self, patch: UpdatePatch) -> RoomState {
        // Merge and fan-out run as one unit; a concurrent update waits here
        // until the previous snapshot has been queued to every connection.
        let _serial = self.gate.lock().await;

        let merged = self.store.merge(patch).await;
        let encoded = Envelope::State(merged.clone()).encode();
        let delivered = self.pusher.broadcast_all(&encoded).await;

        tracing::debug!(
            "state broadcast: slide={} sound={:?} delivered_to={}",
            merged.slide,
            merged.sound,
            delivered
        );
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, MockMessagePusher, MockStateStore, Room, Timestamp};
    use crate::infrastructure::{InMemoryStateStore, WebSocketMessagePusher};
    use crate::usecase::event_gate;
    use tokio::sync::{mpsc, Mutex};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - merge → encode → 全員へのファンアウト、という Hub の中心動作
    //
    // 【どのようなシナリオをテストするか】
    // 1. 送信者を含む全クライアントが 1 通ずつスナップショットを受け取る
    // 2. 空パッチでもファンアウトは行われる
    // 3. 連続する update が到着順に反映される
    // ========================================

    fn client_id(value: &str) -> ClientId {
        ClientId::new(value.to_string()).unwrap()
    }

    fn usecase_with_pusher() -> (UpdateStateUseCase, Arc<WebSocketMessagePusher>) {
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = UpdateStateUseCase::new(
            Arc::new(InMemoryStateStore::new(room)),
            pusher.clone(),
            event_gate(),
        );
        (usecase, pusher)
    }

    #[tokio::test]
    async fn test_update_broadcasts_to_everyone_including_sender() {
        // テスト項目: update 後、送信者を含む全クライアントがマージ結果を 1 通ずつ受け取る
        // given (前提条件):
        let (usecase, pusher) = usecase_with_pusher();
        let (tx_sender, mut rx_sender) = mpsc::unbounded_channel();
        let (tx_other, mut rx_other) = mpsc::unbounded_channel();
        pusher
            .register_client(client_id("controller"), Timestamp::new(0), tx_sender)
            .await
            .unwrap();
        pusher
            .register_client(client_id("viewer"), Timestamp::new(0), tx_other)
            .await
            .unwrap();

        // when (操作):
        let merged = usecase.execute(UpdatePatch::slide(1)).await;

        // then (期待する結果):
        assert_eq!(merged.slide, 1);
        let expected = Envelope::State(merged).encode();
        assert_eq!(rx_sender.recv().await, Some(expected.clone()));
        assert_eq!(rx_other.recv().await, Some(expected));
        // 1 通のみであること
        assert!(rx_sender.try_recv().is_err());
        assert!(rx_other.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_patch_still_fans_out() {
        // テスト項目: 空パッチの update でもスナップショットは配信される
        // given (前提条件):
        let (usecase, pusher) = usecase_with_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher
            .register_client(client_id("viewer"), Timestamp::new(0), tx)
            .await
            .unwrap();

        // when (操作):
        let merged = usecase.execute(UpdatePatch::new()).await;

        // then (期待する結果):
        assert_eq!(merged, RoomState::default());
        assert!(rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_sequential_updates_accumulate() {
        // テスト項目: 連続する update がフィールド単位で積み重なる
        // given (前提条件):
        let (usecase, _pusher) = usecase_with_pusher();

        // when (操作):
        usecase.execute(UpdatePatch::slide(1)).await;
        let merged = usecase
            .execute(UpdatePatch::sound(Some("cue1".to_string())))
            .await;

        // then (期待する結果):
        assert_eq!(merged.slide, 1);
        assert_eq!(merged.sound, Some("cue1".to_string()));
    }

    #[tokio::test]
    async fn test_update_broadcasts_encoded_merge_result() {
        // テスト項目: broadcast に渡されるのは merge が返した状態のエンコード結果
        // given (前提条件):
        let mut store = MockStateStore::new();
        let merged_state = RoomState {
            slide: 3,
            sound: None,
            extra: serde_json::Map::new(),
        };
        let returned = merged_state.clone();
        store
            .expect_merge()
            .times(1)
            .returning(move |_| returned.clone());

        let expected = Envelope::State(merged_state).encode();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast_all()
            .times(1)
            .withf(move |content| content == expected)
            .returning(|_| 1);

        let usecase =
            UpdateStateUseCase::new(Arc::new(store), Arc::new(pusher), event_gate());

        // when (操作):
        let merged = usecase.execute(UpdatePatch::slide(3)).await;

        // then (期待する結果):
        assert_eq!(merged.slide, 3);
    }
}
