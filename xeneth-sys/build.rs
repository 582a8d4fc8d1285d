use std::env;
use std::path::PathBuf;

const SDK_DIR_VAR: &str = "XENETH_SDK_DIR";

fn main() {
    println!("cargo:rerun-if-env-changed={SDK_DIR_VAR}");

    let Some(sdk_dir) = env::var_os(SDK_DIR_VAR).map(PathBuf::from) else {
        if cfg!(feature = "bindgen") {
            panic!("the bindgen feature needs {SDK_DIR_VAR} to point at the Xeneth SDK");
        }
        // Nothing gets linked: the declarations still compile, only a binary
        // that actually calls into the SDK fails at link time.
        println!("cargo:warning={SDK_DIR_VAR} is not set, the Xeneth runtime will not be linked");
        return;
    };

    let lib_dir = match env::consts::OS {
        "windows" => match env::consts::ARCH {
            "x86_64" => sdk_dir.join("Lib").join("x64"),
            "x86" => sdk_dir.join("Lib").join("x86"),
            _ => unimplemented!("Unsupported architecture"),
        },
        "linux" => match env::consts::ARCH {
            "x86_64" | "aarch64" => sdk_dir.join("lib"),
            _ => unimplemented!("Unsupported architecture"),
        },
        _ => unimplemented!("Unsupported OS"),
    };

    println!("cargo:rustc-link-search=native={}", lib_dir.display());

    match (env::consts::OS, env::consts::ARCH) {
        ("windows", "x86_64") => println!("cargo:rustc-link-lib=xeneth64"),
        _ => println!("cargo:rustc-link-lib=xeneth"),
    }

    #[cfg(feature = "bindgen")]
    generate_bindings(&sdk_dir);
}

#[cfg(feature = "bindgen")]
fn generate_bindings(sdk_dir: &std::path::Path) {
    let header = sdk_dir.join("Include").join("XCamera.h");
    println!("cargo:rerun-if-changed={}", header.display());

    let bindings = bindgen::Builder::default()
        .header(header.to_string_lossy())
        .clang_args(["-x", "c++"])
        .allowlist_function("XC_.*")
        .allowlist_type("ErrorCodes|FrameType|XGetFrameFlags|XSaveDataFlags|XLoadCalibrationFlags")
        .default_enum_style(bindgen::EnumVariation::Consts)
        .prepend_enum_name(false)
        .generate()
        .expect("Unable to generate bindings");

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}
