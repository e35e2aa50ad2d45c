use portfolio_models::Sha256Hash;
use portfolio_shared_contracts::hash::HashService;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy, Default)]
pub struct HashServiceImpl;

impl HashService for HashServiceImpl {
    #[tracing::instrument(level = "trace", skip(self, data), ret)]
    fn sha256(&self, data: &[u8]) -> Sha256Hash {
        Sha256Hash(Sha256::new().chain_update(data).finalize().into())
    }
}
