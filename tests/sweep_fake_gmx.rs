//! End-to-end sweep against fake `gmx` shell scripts.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use gmx_speedtest::BenchError;
use gmx_speedtest::core::SweepConfig;
use gmx_speedtest::sweep_cmd::{self, SweepRequest};
use tempfile::tempdir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

const VERSION_BLOCK: &str = r#"if [ "$1" = "--version" ]; then
  echo "GROMACS version:    2023.1"
  echo "GPU support:        disabled"
  echo "Executable:         $0"
  exit 0
fi
"#;

#[test]
fn sweep_with_fake_gmx() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("calls.log");
    let script = format!(
        "#!/bin/sh\n{VERSION_BLOCK}echo \"$* home=${{HOME:-unset}}\" >> '{}'\necho 'Performance:       12.500        1.920' >&2\nexit 0\n",
        log.display()
    );
    let gmx = write_script(dir.path(), "gmx", &script);

    let cfg = SweepConfig::default().with_engine(&gmx).with_cores(3);
    sweep_cmd::run(cfg, SweepRequest::new("sim.tpr")).unwrap();

    let calls = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = calls.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("mdrun -deffnm sim -s sim.tpr -nt 1 -nsteps -1 -maxh 0.002 --pin on"));
    assert!(lines[1].contains("-nt 2"));
    // child only sees the whitelisted environment
    assert!(lines.iter().all(|l| l.ends_with("home=unset")));
}

#[test]
fn fake_gmx_failing_everywhere_is_fatal() {
    let dir = tempdir().unwrap();
    let script = format!("#!/bin/sh\n{VERSION_BLOCK}echo 'Fatal error: fake' >&2\nexit 1\n");
    let gmx = write_script(dir.path(), "gmx", &script);

    let cfg = SweepConfig::default().with_engine(&gmx).with_cores(4);
    let err = sweep_cmd::run(cfg, SweepRequest::new("sim.tpr")).unwrap_err();
    assert!(matches!(err, BenchError::DiagnosticRerunFailed { .. }));
}

#[test]
fn missing_gmx_is_engine_not_found() {
    let dir = tempdir().unwrap();
    let cfg = SweepConfig::default().with_engine(dir.path().join("no-such-gmx")).with_cores(4);
    let err = sweep_cmd::run(cfg, SweepRequest::new("sim.tpr")).unwrap_err();
    assert!(matches!(err, BenchError::EngineNotFound(_)));
}

#[test]
fn unrecognized_version_output_is_rejected() {
    let dir = tempdir().unwrap();
    let gmx = write_script(dir.path(), "gmx", "#!/bin/sh\necho 'hello from not-gromacs'\nexit 0\n");
    let cfg = SweepConfig::default().with_engine(&gmx).with_cores(4);
    let err = sweep_cmd::run(cfg, SweepRequest::new("sim.tpr")).unwrap_err();
    assert!(matches!(err, BenchError::UnrecognizedProbeOutput));
}
