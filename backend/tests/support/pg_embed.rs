//! Process-wide embedded PostgreSQL cluster.
//!
//! The cluster lives for the whole test binary; suites clone per-test
//! databases from a migrated template (see `embedded_postgres`).
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` are pointed at the cargo target
//! directory unless the caller already set them, so bootstrap works in
//! sandboxes that forbid writing to `/var/tmp`.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const BOOTSTRAP_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn pg_embed_dir() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("target"))
        .join("pg-embed")
}

/// Download and unpack failures worth another attempt.
fn is_transient(message: &str) -> bool {
    let lowered = message.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| lowered.contains(pattern))
}

/// Start (or reuse) the shared cluster.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _guard = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let base = pg_embed_dir().join(format!("barbershop-{}", std::process::id()));
        let runtime_dir = base.join("install");
        let data_dir = base.join("data");
        std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
        std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            (
                "PG_RUNTIME_DIR",
                Some(runtime_dir.to_string_lossy().into_owned()),
            ),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=BOOTSTRAP_RETRIES {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == BOOTSTRAP_RETRIES || !is_transient(&last_error) {
                    break;
                }
                eprintln!("pg-embed: attempt {} failed, retrying: {last_error}", attempt + 1);
                std::thread::sleep(RETRY_DELAY * (attempt + 1));
            }
        }
    }
    Err(last_error)
}
