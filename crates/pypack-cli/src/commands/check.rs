//! Check command implementation

use color_eyre::eyre::Result;
use tracing::info;

/// Check command: probe the packaging tool without starting a job
pub struct CheckCommand {
    tool: String,
}

impl CheckCommand {
    pub fn new(tool: String) -> Self {
        Self { tool }
    }

    pub async fn execute(&self) -> Result<()> {
        info!("Probing packaging tool: {}", self.tool);

        match pypack_build::probe(&self.tool).await {
            Ok(()) => {
                println!("✓ {} is installed and invocable", self.tool);
                Ok(())
            }
            Err(e) => {
                eprintln!("{} is not installed. Install it with:", self.tool);
                eprintln!("    pip install pyinstaller");
                Err(e.into())
            }
        }
    }
}
