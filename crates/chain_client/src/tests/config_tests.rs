use std::{
    env, fs,
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::config::load_settings;

// Environment overrides are process-global; serialize the tests that touch
// them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn defaults_match_reference_deployment() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    let settings = load_settings(None);
    assert_eq!(settings.rpc_url, "http://127.0.0.1:8545");
    assert_eq!(
        settings.token0.address,
        "0xA854C1bC1aEcC80094E2ac3C0EE98581460F1caD"
    );
    assert_eq!(settings.token0.decimals, 18);
    assert_eq!(
        settings.token1.address,
        "0xF997350F2Ea6fCB6d5CD7366F4836958CCc74460"
    );
    assert_eq!(settings.token1.decimals, 6);
    assert_eq!(
        settings.pair_address,
        "0xdE18780E8940631148580b8Cf84e579F704430fD"
    );
    assert_eq!(
        settings.sell_address,
        "0x3ff0fEeCf3aD3b79480018d165dbD401995A0376"
    );
}

#[test]
fn file_then_env_overrides_apply_in_order() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("swapdesk_settings_{suffix}.toml"));
    fs::write(
        &path,
        "rpc_url = \"http://10.0.0.1:8545\"\nsell_address = \"0x0000000000000000000000000000000000000001\"\n",
    )
    .expect("write settings file");

    env::set_var("SWAPDESK_RPC_URL", "http://10.0.0.2:8545");
    let settings = load_settings(Some(&path));
    env::remove_var("SWAPDESK_RPC_URL");
    fs::remove_file(&path).expect("cleanup");

    // Env wins over the file; file wins over the defaults; untouched keys keep
    // their defaults.
    assert_eq!(settings.rpc_url, "http://10.0.0.2:8545");
    assert_eq!(
        settings.sell_address,
        "0x0000000000000000000000000000000000000001"
    );
    assert_eq!(settings.token0.decimals, 18);
}

#[test]
fn malformed_decimals_override_is_ignored() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    env::set_var("SWAPDESK_TOKEN0_DECIMALS", "eighteen");
    let settings = load_settings(None);
    env::remove_var("SWAPDESK_TOKEN0_DECIMALS");

    assert_eq!(settings.token0.decimals, 18);
}

#[test]
fn missing_settings_file_falls_back_to_defaults() {
    let _guard = ENV_LOCK.lock().expect("env lock");

    let path = env::temp_dir().join("swapdesk_settings_does_not_exist.toml");
    let settings = load_settings(Some(&path));
    assert_eq!(settings.rpc_url, "http://127.0.0.1:8545");
}
