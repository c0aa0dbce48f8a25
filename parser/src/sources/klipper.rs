//! Klipper firmware G-code reference.
//!
//! The page documents RepRap `G`/`M` codes and Klipper's extended
//! commands in bullet lists such as
//!
//! ```text
//! <h3 id="set_fan_speed">SET_FAN_SPEED</h3>
//! <ul><li><code>SET_FAN_SPEED FAN=config_name SPEED=&lt;speed&gt;</code>: This command ...</li></ul>
//! ```

use crate::registry::DocumentationParser;

pub const ID: &str = "klipper";
pub const SOURCE: &str = "Klipper";
pub const URL: &str = "https://www.klipper3d.org/G-Codes.html";
pub const SNAPSHOT_FILE: &str = "g-codes.html";

pub struct KlipperParser;

impl DocumentationParser for KlipperParser {
    fn id(&self) -> &'static str {
        ID
    }

    fn source(&self) -> &'static str {
        SOURCE
    }

    fn url(&self) -> &'static str {
        URL
    }

    fn snapshot_file(&self) -> &'static str {
        SNAPSHOT_FILE
    }
}
