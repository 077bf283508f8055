//! Byte encodings for stored snapshots.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{StoreError, StoreResult};

/// Turns states into stored bytes and back.
pub trait Codec: Send + Sync {
    fn encode<T: Serialize>(&self, value: &T) -> StoreResult<Vec<u8>>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> StoreResult<T>;
}

/// JSON text. Missing optional fields and empty collections fall back to
/// their defaults, so snapshots from stores that drop empty arrays decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(value).map_err(StoreError::codec)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> StoreResult<T> {
        serde_json::from_slice(bytes).map_err(StoreError::codec)
    }
}

/// Compact binary. Field layout must match exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn encode<T: Serialize>(&self, value: &T) -> StoreResult<Vec<u8>> {
        bincode::serialize(value).map_err(StoreError::codec)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> StoreResult<T> {
        bincode::deserialize(bytes).map_err(StoreError::codec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::chess::ChessState;
    use crate::games::uno::UnoGameBuilder;

    #[test]
    fn test_json_tolerates_missing_fields() {
        let json = br#"{"turn":"white"}"#;
        let state: ChessState = JsonCodec.decode(json).unwrap();
        assert_eq!(state.board, ChessState::default().board);
        assert!(state.winner.is_none());
        assert!(state.last_move.is_none());
    }

    #[test]
    fn test_bincode_keeps_uno_table() {
        let (_, state) = UnoGameBuilder::new().build(5);
        let bytes = BincodeCodec.encode(&state).unwrap();
        let back: crate::games::uno::UnoState = BincodeCodec.decode(&bytes).unwrap();
        assert_eq!(state, back);
    }

    #[test]
    fn test_garbage_is_codec_error() {
        let err = JsonCodec.decode::<ChessState>(b"not json").unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
        let err = BincodeCodec.decode::<ChessState>(&[1, 2]).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}
