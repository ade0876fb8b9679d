use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(limb_width_32)");
    println!("cargo:rustc-check-cfg=cfg(limb_width_64)");

    // Decide ideal limb width for the digit store. Refer to
    // src/digits/math.rs for where this has an effect.
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let limb_width_64 = matches!(
        target_arch.as_str(),
        "aarch64" | "mips64" | "powerpc64" | "x86_64"
    );
    let forced_32 = env::var_os("CARGO_FEATURE_LIMB32").is_some();
    if limb_width_64 && !forced_32 {
        println!("cargo:rustc-cfg=limb_width_64");
    } else {
        println!("cargo:rustc-cfg=limb_width_32");
    }
}
