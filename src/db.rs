//! Database connection management
//!
//! Handles connection pooling and schema bootstrap.

pub mod queries;
pub mod service;

pub use service::{CommentService, PostService};

use crate::config::{DatabaseConfig, TlsMode};
use crate::error::AppError;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, WebPkiSupportedAlgorithms};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, SignatureScheme};
use std::sync::Arc;
use tokio_postgres::NoTls;
use tracing::{debug, info};

/// Build a pool for the configured database.
///
/// No connection is opened here; the first `pool.get()` dials the server.
pub fn create_pool(config: &DatabaseConfig) -> Result<Pool, AppError> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(config.max_pool_size));

    let pool = match config.tls {
        TlsMode::Disabled => cfg.create_pool(Some(Runtime::Tokio1), NoTls),
        TlsMode::AcceptInvalidCerts => {
            let tls = tokio_postgres_rustls::MakeRustlsConnect::new(insecure_tls_config()?);
            cfg.create_pool(Some(Runtime::Tokio1), tls)
        }
    };

    pool.map_err(|e| AppError::Config(format!("Failed to create pool: {}", e)))
}

/// Check that a connection can be established and answers a query
pub async fn verify_connection(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;
    client.query_one("SELECT 1", &[]).await?;
    info!("Database connection verified");
    Ok(())
}

/// Create the `posts` and `comments` tables if they don't exist
pub async fn init_schema(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;

    client.execute(queries::CREATE_POSTS_TABLE, &[]).await?;
    client.execute(queries::CREATE_COMMENTS_TABLE, &[]).await?;
    client.execute(queries::CREATE_COMMENTS_POST_INDEX, &[]).await?;

    info!("Database tables initialized");
    Ok(())
}

/// TLS client config that accepts any server certificate
fn insecure_tls_config() -> Result<rustls::ClientConfig, AppError> {
    debug!("TLS enabled without certificate verification");
    let provider = rustls::crypto::aws_lc_rs::default_provider();
    let algorithms = provider.signature_verification_algorithms;

    let config = rustls::ClientConfig::builder_with_provider(Arc::new(provider))
        .with_safe_default_protocol_versions()
        .map_err(|e| AppError::Config(format!("Failed to build TLS config: {}", e)))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCert { algorithms }))
        .with_no_client_auth();

    Ok(config)
}

/// Skips chain and hostname checks; handshake signatures are still verified.
#[derive(Debug)]
struct AcceptAnyCert {
    algorithms: WebPkiSupportedAlgorithms,
}

impl ServerCertVerifier for AcceptAnyCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.algorithms.supported_schemes()
    }
}
