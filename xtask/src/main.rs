use anyhow::{anyhow, bail, Context, Result};
use phyfft::kernel::KernelLifecycle;
use phyfft::signal::traits::{
    AutoCorrelate1D, BroadcastPower1D, ComplexSpectrum1D, CrossCorrelate1D,
};
use phyfft::signal::{
    sliding_cross_correlation, AutoCorrelateKernel, ComplexFftConfig, ComplexFftKernel,
    CorrelateConfig, CrossCorrelateKernel, PowerConfig, PowerKernel,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const DEFAULT_PYTHON_BIN: &str = "python";

const PY_SIGNAL_SCRIPT: &str = r#"
import json
import sys
import time
import numpy as np

env = json.loads(sys.stdin.read())
op = env["op"]
iters = int(env["iters"])
p = env["payload"]

def _as_array(key):
    return np.asarray(p[key], dtype=float)

def _flat(v):
    return np.asarray(v, dtype=float).reshape(-1)

def _held(v, n):
    if len(v) >= n:
        return v
    return np.concatenate([v, np.full(n - len(v), v[-1])])

def _compute():
    if op == "power":
        a = _as_array("a")
        b = _as_array("b")
        n = max(len(a), len(b))
        return np.power(_held(a, n), _held(b, n))
    if op == "complex_fft":
        xy = _as_array("xy")
        bins = np.fft.fft(xy[0::2] + 1j * xy[1::2])
        out = np.empty(2 * len(bins))
        out[0::2] = bins.real
        out[1::2] = bins.imag
        return out
    if op == "cross_correlate":
        x = _as_array("x")
        y = _as_array("y")
        return np.real(np.fft.ifft(np.fft.fft(x) * np.conj(np.fft.fft(y)))) / len(x)
    if op == "auto_correlate":
        x = _as_array("x")
        return np.real(np.fft.ifft(np.abs(np.fft.fft(x)) ** 2))
    if op == "sliding_cross_correlation":
        a = _as_array("long")
        b = _as_array("short")
        size = 2 * (len(a) + len(b))
        lags = len(a) - len(b)
        return np.array([np.dot(a[i:i + len(b)], b) for i in range(lags)]) / size

    raise RuntimeError(f"unsupported op: {op}")

y = _flat(_compute())

t0 = time.perf_counter_ns()
for _ in range(iters):
    _compute()
t1 = time.perf_counter_ns()

print(json.dumps({
    "output": y.tolist(),
    "avg_ns": (t1 - t0) / max(iters, 1),
    "python_version": sys.version.split()[0],
    "numpy_version": np.__version__
}))
"#;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct PythonEval {
    output: Vec<f64>,
    avg_ns: f64,
    python_version: String,
    numpy_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    rust_candidate_ns: f64,
    rust_naive_ns: f64,
    python_ns: f64,
    speedup_vs_naive: f64,
    speedup_vs_python: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    python_executable: String,
    python_version: String,
    numpy_version: String,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from(format!("target/contracts/{ts}"));
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let python_bin = detect_python_bin();
    let mut rows = Vec::new();

    // Shared synthetic measurement trace.
    let trace: Vec<f32> = (0..1024)
        .map(|i| {
            let x = i as f32 / 27.0;
            x.sin() + 0.35 * (2.3 * x).cos() + 0.1 * (7.0 * x).sin()
        })
        .collect();

    // Broadcast power
    {
        let case_id = "power_broadcast_f64";
        let a: Vec<f64> = (0..300).map(|i| 0.5 + i as f64 / 100.0).collect();
        let b: Vec<f64> = (0..120).map(|i| 1.0 + (i as f64 / 30.0).sin()).collect();

        let kernel = PowerKernel::try_new(PowerConfig)?;
        let candidate = kernel
            .run_alloc(a.as_slice(), b.as_slice())
            .map_err(|e| anyhow!("power candidate execution failed: {e}"))?;
        let py = python_signal_eval(&python_bin, "power", json!({ "a": a, "b": b }), 200)?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc(a.as_slice(), b.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("power candidate benchmark failed: {e}"))
        })?;
        let naive_ns = benchmark_avg_ns(200, || {
            let _ = naive_power(&a, &b);
            Ok(())
        })?;

        record_case(&mut rows, case_id, candidate, py, candidate_ns, naive_ns)?;
    }

    // Complex spectrum
    {
        let case_id = "complex_fft_f32";
        let n = 500;
        let xy: Vec<f32> = trace
            .iter()
            .take(n)
            .flat_map(|&re| [re, 0.5 * re * re])
            .collect();

        let kernel = ComplexFftKernel::try_new(ComplexFftConfig { n })?;
        let candidate = kernel
            .run_alloc(xy.as_slice())
            .map_err(|e| anyhow!("complex fft candidate execution failed: {e}"))?;
        let py = python_signal_eval(&python_bin, "complex_fft", json!({ "xy": xy }), 200)?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc(xy.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("complex fft candidate benchmark failed: {e}"))
        })?;
        let naive_ns = benchmark_avg_ns(5, || {
            let _ = naive_dft(&xy);
            Ok(())
        })?;

        record_case(&mut rows, case_id, widen(&candidate), py, candidate_ns, naive_ns)?;
    }

    // Cross-correlation
    {
        let case_id = "cross_correlate_f32";
        let n = 512;
        let x = trace.iter().copied().take(n).collect::<Vec<_>>();
        let y = trace.iter().copied().skip(37).take(n).collect::<Vec<_>>();

        let kernel = CrossCorrelateKernel::try_new(CorrelateConfig { n })?;
        let candidate = kernel
            .run_alloc(x.as_slice(), y.as_slice())
            .map_err(|e| anyhow!("cross-correlation candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "cross_correlate",
            json!({ "x": x, "y": y }),
            200,
        )?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc(x.as_slice(), y.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("cross-correlation candidate benchmark failed: {e}"))
        })?;
        let naive_ns = benchmark_avg_ns(5, || {
            let _ = naive_circular_correlation(&x, &y);
            Ok(())
        })?;

        record_case(&mut rows, case_id, widen(&candidate), py, candidate_ns, naive_ns)?;
    }

    // Auto-correlation, even and odd periods
    for (case_id, n) in [("auto_correlate_f32", 512usize), ("auto_correlate_odd_f32", 511)] {
        let x = trace.iter().copied().take(n).collect::<Vec<_>>();

        let kernel = AutoCorrelateKernel::try_new(CorrelateConfig { n })?;
        let candidate = kernel
            .run_alloc(x.as_slice())
            .map_err(|e| anyhow!("auto-correlation candidate execution failed: {e}"))?;
        let py = python_signal_eval(&python_bin, "auto_correlate", json!({ "x": x }), 200)?;

        let candidate_ns = benchmark_avg_ns(200, || {
            kernel
                .run_alloc(x.as_slice())
                .map(|_| ())
                .map_err(|e| anyhow!("auto-correlation candidate benchmark failed: {e}"))
        })?;
        let naive_ns = benchmark_avg_ns(5, || {
            let _ = naive_circular_correlation(&x, &x);
            Ok(())
        })?;

        record_case(&mut rows, case_id, widen(&candidate), py, candidate_ns, naive_ns)?;
    }

    // Sliding cross-correlation
    {
        let case_id = "sliding_cross_correlation_f32";
        let long = trace.iter().copied().take(400).collect::<Vec<_>>();
        let short = trace.iter().copied().skip(120).take(64).collect::<Vec<_>>();

        let candidate = sliding_cross_correlation(&long, &short)
            .map_err(|e| anyhow!("sliding correlation candidate execution failed: {e}"))?;
        let py = python_signal_eval(
            &python_bin,
            "sliding_cross_correlation",
            json!({ "long": long, "short": short }),
            200,
        )?;

        let candidate_ns = benchmark_avg_ns(200, || {
            sliding_cross_correlation(&long, &short)
                .map(|_| ())
                .map_err(|e| anyhow!("sliding correlation candidate benchmark failed: {e}"))
        })?;
        let naive_ns = benchmark_avg_ns(50, || {
            let _ = naive_sliding_correlation(&long, &short);
            Ok(())
        })?;

        record_case(&mut rows, case_id, widen(&candidate), py, candidate_ns, naive_ns)?;
    }

    let versions = python_versions(&python_bin)?;
    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        python_executable: python_bin.to_string_lossy().into_owned(),
        python_version: versions.python_version,
        numpy_version: versions.numpy_version,
        rows,
    };

    let json_path = out_dir.join("contracts.json");
    let json_bytes = serde_json::to_vec_pretty(&bundle).context("serializing contract bundle")?;
    fs::write(&json_path, json_bytes)
        .with_context(|| format!("writing {}", json_path.display()))?;
    let csv_path = out_dir.join("summary.csv");
    write_summary_csv(&csv_path, &bundle.rows)?;

    println!("contracts written to {}", out_dir.display());
    for row in &bundle.rows {
        println!(
            "{:<32} r={:.9} max_abs={:.3e} x{:.1} vs naive, x{:.1} vs numpy",
            row.case_id, row.pearson_r, row.max_abs, row.speedup_vs_naive, row.speedup_vs_python
        );
    }
    Ok(())
}

fn detect_python_bin() -> PathBuf {
    PathBuf::from(DEFAULT_PYTHON_BIN)
}

fn python_versions(python_bin: &Path) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        r#"
import json, sys
import numpy
payload = json.loads(sys.stdin.read())
print(json.dumps({
    "output": [],
    "avg_ns": 0.0,
    "python_version": sys.version.split()[0],
    "numpy_version": numpy.__version__
}))
"#,
        json!({}),
    )
}

fn python_signal_eval(
    python_bin: &Path,
    op: &str,
    payload: serde_json::Value,
    iters: usize,
) -> Result<PythonEval> {
    run_python_eval(
        python_bin,
        PY_SIGNAL_SCRIPT,
        json!({
            "op": op,
            "iters": iters,
            "payload": payload
        }),
    )
}

fn run_python_eval(
    python_bin: &Path,
    script: &str,
    payload: serde_json::Value,
) -> Result<PythonEval> {
    let mut child = Command::new(python_bin)
        .arg("-c")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("spawning python interpreter at {}", python_bin.display()))?;

    {
        let stdin = child.stdin.as_mut().context("opening python stdin")?;
        let payload_bytes = serde_json::to_vec(&payload).context("serializing python payload")?;
        stdin
            .write_all(&payload_bytes)
            .context("writing payload to python stdin")?;
    }

    let output = child
        .wait_with_output()
        .context("waiting for python process")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("python execution failed: {stderr}");
    }
    let stdout = String::from_utf8(output.stdout).context("parsing python stdout utf8")?;
    let parsed: PythonEval = serde_json::from_str(stdout.trim()).context("parsing python json")?;
    Ok(parsed)
}

fn record_case(
    rows: &mut Vec<ContractRow>,
    case_id: &str,
    candidate: Vec<f64>,
    py: PythonEval,
    candidate_ns: f64,
    naive_ns: f64,
) -> Result<()> {
    ensure_same_length(case_id, &candidate, &py.output)?;
    rows.push(build_row(RowBuildInput {
        case_id,
        rust_candidate: &candidate,
        python_reference: &py.output,
        rust_candidate_ns: candidate_ns,
        rust_naive_ns: naive_ns,
        python_ns: py.avg_ns,
    }));
    Ok(())
}

fn widen(samples: &[f32]) -> Vec<f64> {
    samples.iter().map(|&v| f64::from(v)).collect()
}

fn naive_power(a: &[f64], b: &[f64]) -> Vec<f64> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| a[i.min(a.len() - 1)].powf(b[i.min(b.len() - 1)]))
        .collect()
}

fn naive_dft(xy: &[f32]) -> Vec<f64> {
    let n = xy.len() / 2;
    let mut out = Vec::with_capacity(2 * n);
    for k in 0..n {
        let (mut re, mut im) = (0.0f64, 0.0f64);
        for j in 0..n {
            let phase = -2.0 * std::f64::consts::PI * ((j * k) % n) as f64 / n as f64;
            let (s, c) = phase.sin_cos();
            let (xr, xi) = (f64::from(xy[2 * j]), f64::from(xy[2 * j + 1]));
            re += xr * c - xi * s;
            im += xr * s + xi * c;
        }
        out.push(re);
        out.push(im);
    }
    out
}

fn naive_circular_correlation(x: &[f32], y: &[f32]) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|lag| {
            (0..n)
                .map(|l| f64::from(x[(l + lag) % n]) * f64::from(y[l]))
                .sum::<f64>()
        })
        .collect()
}

fn naive_sliding_correlation(long: &[f32], short: &[f32]) -> Vec<f64> {
    let size = 2 * (long.len() + short.len());
    (0..long.len() - short.len())
        .map(|lag| {
            short
                .iter()
                .enumerate()
                .map(|(j, &s)| f64::from(long[lag + j]) * f64::from(s))
                .sum::<f64>()
                / size as f64
        })
        .collect()
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

struct RowBuildInput<'a> {
    case_id: &'a str,
    rust_candidate: &'a [f64],
    python_reference: &'a [f64],
    rust_candidate_ns: f64,
    rust_naive_ns: f64,
    python_ns: f64,
}

fn build_row(args: RowBuildInput<'_>) -> ContractRow {
    ContractRow {
        case_id: args.case_id.to_string(),
        pearson_r: pearson(args.rust_candidate, args.python_reference),
        mae: mean_abs_error(args.rust_candidate, args.python_reference),
        rmse: root_mean_squared_error(args.rust_candidate, args.python_reference),
        max_abs: max_abs_error(args.rust_candidate, args.python_reference),
        rust_candidate_ns: args.rust_candidate_ns,
        rust_naive_ns: args.rust_naive_ns,
        python_ns: args.python_ns,
        speedup_vs_naive: args.rust_naive_ns / args.rust_candidate_ns,
        speedup_vs_python: args.python_ns / args.rust_candidate_ns,
    }
}

fn mean_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .sum::<f64>()
        / a.len() as f64
}

fn root_mean_squared_error(a: &[f64], b: &[f64]) -> f64 {
    (a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        / a.len() as f64)
        .sqrt()
}

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,pearson_r,mae,rmse,max_abs,rust_candidate_ns,rust_naive_ns,python_ns,speedup_vs_naive,speedup_vs_python\n");
    for row in rows {
        out.push_str(&format!(
            "{},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.3},{:.6},{:.6}\n",
            row.case_id,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.rust_candidate_ns,
            row.rust_naive_ns,
            row.python_ns,
            row.speedup_vs_naive,
            row.speedup_vs_python,
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
