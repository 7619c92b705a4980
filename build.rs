use std::cmp::Ordering;
use std::env;
use std::process::Command;

// CPU features that select a SIMD backend for the vectorized kernel
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    target_arches: &'static [&'static str],
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Lowest number == Highest Priority
    fn priority(&self) -> usize {
        match self.name {
            "avx2" => 0,
            "neon" => 1,
            _ => usize::MAX,
        }
    }

    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                target_arches: &["x86", "x86_64"],
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "neon",
                target_arches: &["aarch64"],
                cfg_flag: "neon",
                detected: false,
            },
        ]
    }

    fn matches_target(&self, target_arch: &str) -> bool {
        self.target_arches.contains(&target_arch)
    }
}

impl Ord for CpuFeature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for CpuFeature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected |= match feature.name {
                    // aarch64 kernels report NEON as "asimd"
                    "neon" => contents.contains("neon") || contents.contains("asimd"),
                    name => contents.contains(name),
                };
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => feature.detected |= contents.contains("hw.optional.avx2_0: 1"),
                    "neon" => feature.detected |= contents.contains("hw.optional.neon: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Features already enabled for the target (e.g. `-C target-cpu=native`, or
// NEON, which every aarch64 target enables by default)
struct TargetFeatureDetector;
impl CpuFeatureDetector for TargetFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let enabled = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
        for feature in features.iter_mut() {
            feature.detected |= enabled.split(',').any(|f| f == feature.name);
        }
    }

    fn is_applicable(&self) -> bool {
        true
    }
}

struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        // The first applicable host detector wins
        for detector in Self::cpu_features_detectors() {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature], target_arch: &str) {
        features.sort();

        // Highest priority feature that is detected and valid for the target,
        // scalar fallback otherwise
        let cfg_flag = features
            .iter()
            .find(|cpu_feature| cpu_feature.detected && cpu_feature.matches_target(target_arch))
            .map(|cpu_feature| cpu_feature.cfg_flag)
            .unwrap_or("fallback");

        println!("cargo:rustc-cfg={cfg_flag}");

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(neon)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    // Probing the host CPU only makes sense for native builds
    if host == target {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    TargetFeatureDetector.detect_features(&mut features);

    PlatformDetector::apply(&mut features, &target_arch);
}
