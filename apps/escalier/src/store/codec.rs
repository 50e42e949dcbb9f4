use crate::domain::session::GameSession;
use crate::store::StoreError;

/// Serialize the whole session.
pub fn encode(session: &GameSession) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(session)?)
}

/// Restore a session and reject blobs whose state could not have been
/// reached through the public operations.
pub fn decode(blob: &[u8]) -> Result<GameSession, StoreError> {
    let session: GameSession = serde_json::from_slice(blob)?;
    session.check_invariants().map_err(StoreError::Corrupt)?;
    Ok(session)
}
