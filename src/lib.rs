#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
#[cfg(feature = "cli")]
pub mod logging;
pub mod pairing;
pub mod pairing_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PairingConfig, RenderConfig};
pub use ir::{ConnectorSpec, Scenario};
pub use pairing::{
    Connector, Frame, Pair, Pairing, PairingError, SplitAxis, Vec3, pair_connectors, pair_connectors_with,
};
pub use pairing_dump::PairingDump;
pub use parser::parse_scenario;
pub use render::{render_svg, render_text};
pub use theme::Theme;
