//! MCP capability negotiation during initialization.

use crate::types::{
    ClientCapabilities, Implementation, InitializeParams, InitializeResult, McpError, McpResult,
    MCP_VERSION, SUPPORTED_VERSIONS,
};

/// Protocol version to answer a client requesting `requested`.
///
/// A supported version is echoed back; anything else gets the newest
/// version this server speaks.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_VERSIONS
        .iter()
        .copied()
        .find(|v| *v == requested)
        .unwrap_or(MCP_VERSION)
}

/// Stored client capabilities after negotiation.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    /// The client's declared capabilities.
    pub client: ClientCapabilities,
    /// The client's implementation info.
    pub client_info: Implementation,
    /// Version agreed in the handshake.
    pub protocol_version: Option<String>,
    /// Whether `initialize` has been answered.
    pub initialized: bool,
}

impl NegotiatedCapabilities {
    /// Process an initialize request and return the result.
    pub fn negotiate(
        &mut self,
        params: InitializeParams,
        server_info: Implementation,
    ) -> InitializeResult {
        let version = negotiate_version(&params.protocol_version);
        if version != params.protocol_version {
            tracing::warn!(
                "Client requested protocol version {:?}, answering with {}",
                params.protocol_version,
                version
            );
        }

        tracing::info!(
            "Initialized with client: {} v{} (protocol {})",
            params.client_info.name,
            params.client_info.version,
            version
        );

        self.client = params.capabilities;
        self.client_info = params.client_info;
        self.protocol_version = Some(version.to_string());
        self.initialized = true;

        InitializeResult::new(server_info, version)
    }

    /// Record the client's `initialized` notification.
    pub fn mark_initialized(&mut self) {
        if !self.initialized {
            tracing::warn!("Received initialized notification before initialize");
        }
        tracing::info!("MCP handshake complete");
    }

    /// Check that the handshake is complete before processing requests.
    pub fn ensure_initialized(&self) -> McpResult<()> {
        if !self.initialized {
            return Err(McpError::InvalidRequest(
                "Server not yet initialized. Send 'initialize' first.".to_string(),
            ));
        }
        Ok(())
    }
}
