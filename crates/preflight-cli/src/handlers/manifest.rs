//! Manifest command handler

use crate::error::CliResult;
use crate::manifest::discovery_manifest;
use preflight::PreflightError;

/// Pretty JSON of the discovery manifest
pub fn render_manifest() -> CliResult<String> {
    Ok(serde_json::to_string_pretty(&discovery_manifest()).map_err(PreflightError::from)?)
}

/// Execute the manifest command
pub fn execute_manifest() -> CliResult<()> {
    println!("{}", render_manifest()?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manifest::DiscoveryManifest;

    #[test]
    fn test_render_round_trips() {
        let json = render_manifest().unwrap();
        let parsed: DiscoveryManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, discovery_manifest());
    }
}
