//! Startup banner and farewell.

use crate::resilience::RetryPolicy;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub endpoint: &'a str,
    pub key_source: &'a str,
    pub policy: RetryPolicy,
}

/// Render the startup banner with session info.
pub fn banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              A U G U R                ║
   ║   security & edge, CQ4 2025 earnings  ║
   ╚═══════════════════════════════════════╝

   version   {}
   model     {}
   endpoint  {}
   key       {}
   retries   {} attempts, first wait {:?}

   type /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        info.model,
        info.endpoint,
        info.key_source,
        info.policy.max_attempts(),
        info.policy.initial_delay(),
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner(info));
}

pub fn print_farewell() {
    println!("goodbye.");
}
