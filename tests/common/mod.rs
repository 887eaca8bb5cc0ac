//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An on-disk project: `.spec_agent/config.yaml` plus spec files, in a temp dir.
#[allow(dead_code)]
pub struct TestProject {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Project whose config declares `roots` as search roots.
    pub fn new(roots: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = String::from(if roots.is_empty() { "roots: []\n" } else { "roots:\n" });
        for root in roots {
            config.push_str(&format!("  - {root}\n"));
        }
        std::fs::create_dir_all(dir.path().join(".spec_agent")).unwrap();
        std::fs::write(dir.path().join(".spec_agent/config.yaml"), config).unwrap();
        TestProject { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a spec at `relative`, creating parent directories.
    pub fn spec(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}

/// A small service landscape:
///
/// ```text
/// cmd/api.md -> internal/controllers/orders.md -> internal/services/orders.md -> internal/storage/db.md
///                                               \-> internal/services/billing.md -> internal/storage/db.md
/// cmd/worker.md -> internal/services/billing.md
/// ```
///
/// Search roots are `cmd` and `internal`.
#[allow(dead_code)]
pub fn create_service_project() -> TestProject {
    let project = TestProject::new(&["cmd", "internal"]);
    project.spec(
        "cmd/api.md",
        "# API Server\n\nEntry point. See [conventions](../docs/conventions.md).\n\n## Dependencies\n\n- [Orders Controller](../internal/controllers/orders.md)\n",
    );
    project.spec(
        "cmd/worker.md",
        "# Worker\n\n## Dependencies\n\n- [Billing](../internal/services/billing.md)\n",
    );
    project.spec(
        "internal/controllers/orders.md",
        "# Orders Controller\n\n## Dependencies\n\n- [Orders Service](../services/orders.md)\n- [Billing](../services/billing.md)\n",
    );
    project.spec(
        "internal/services/orders.md",
        "# Orders Service\n\n## Storage\n\n- [Database](../storage/db.md)\n",
    );
    project.spec(
        "internal/services/billing.md",
        "# Billing\n\n## Storage\n\n- [Database](../storage/db.md)\n",
    );
    project.spec(
        "internal/storage/db.md",
        "# Database\n\n## Tables\n\n- `orders`\n- `invoices`\n",
    );
    project
}
