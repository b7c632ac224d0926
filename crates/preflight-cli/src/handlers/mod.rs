//! Command handlers - extracted from main.rs for testability

pub mod analyze;
pub mod init;
pub mod manifest;
pub mod serve;

pub use analyze::{check_gate, execute_analyze, load_proposal, parse_proposal, ProposalFormat};
pub use init::{execute_init, proposal_template, write_template};
pub use manifest::{execute_manifest, render_manifest};
pub use serve::{build_server_config, execute_serve};
