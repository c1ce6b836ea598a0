fn main() {
    // Rebuild when the build-time network configuration changes.
    for var in [
        "AILED_WIFI_SSID",
        "AILED_WIFI_PASS",
        "AILED_MQTT_URL",
        "AILED_DEVICE_TOKEN",
        "AILED_PREDICT_URL",
    ] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
