use clap::Args;
use serde_json::{json, Value};

use stockflow_core::supply::stage::{self, Classification};

use crate::input;

/// Arguments for purchase-order status classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Raw status code, e.g. "09. Under Production"
    #[arg(long)]
    pub status: Option<String>,
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let status = if let Some(status) = args.status {
        status
    } else if let Some(data) = input::stdin::read_stdin()? {
        data.get("status")
            .and_then(Value::as_str)
            .ok_or("stdin JSON must carry a \"status\" field")?
            .to_string()
    } else {
        return Err("--status <code> or stdin required for classification".into());
    };

    let (classification, stage) = stage::classify(&status);
    Ok(json!({
        "result": {
            "status": status,
            "known": stage.is_some(),
            "stage": stage.map(|s| s.code()),
            "classification": match classification {
                Classification::Signed => "signed",
                Classification::Unsigned => "unsigned",
            },
        }
    }))
}
