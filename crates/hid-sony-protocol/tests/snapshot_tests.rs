//! Snapshot tests for protocol constants and encoded packets.

use dualhaptics_hid_sony_protocol::{
    BT_BLOCK_SAMPLES, ConnectionMode, DUALSENSE_EDGE_PRODUCT_ID, DUALSENSE_PRODUCT_ID,
    DeviceModel, SONY_VENDOR_ID, encode_bt_block, encode_usb_frame,
};
use insta::assert_snapshot;

// -- ID constants -------------------------------------------------------------

#[test]
fn snapshot_vendor_id() {
    assert_snapshot!(format!("{SONY_VENDOR_ID:#06X}"), @"0x054C");
}

#[test]
fn snapshot_dualsense_ids() {
    assert_snapshot!(
        format!("{DUALSENSE_PRODUCT_ID:#06X} {DUALSENSE_EDGE_PRODUCT_ID:#06X}"),
        @"0x0CE6 0x0DF2"
    );
}

// -- Encoded payloads ---------------------------------------------------------

#[test]
fn snapshot_bt_ramp_head() {
    let mut block = [0.0f32; BT_BLOCK_SAMPLES];
    block[0] = 1.0;
    block[1] = -1.0;
    block[2] = 0.5;
    block[3] = -0.5;
    let [first, _] = encode_bt_block(&block);
    assert_snapshot!(format!("{:?}", &first.as_bytes()[..6]), @"[127, 128, 64, 192, 0, 0]");
}

#[test]
fn snapshot_usb_full_scale() {
    let bytes = encode_usb_frame(1.0, -1.0).to_le_bytes();
    assert_snapshot!(format!("{bytes:02X?}"), @"[FF, 7F, 01, 80]");
}

// -- Serde --------------------------------------------------------------------

#[test]
fn snapshot_connection_mode_json() -> Result<(), serde_json::Error> {
    let json = serde_json::to_string(&[ConnectionMode::Usb, ConnectionMode::Bluetooth])?;
    assert_snapshot!(json, @r#"["usb","bluetooth"]"#);
    Ok(())
}

#[test]
fn snapshot_device_model_json() -> Result<(), serde_json::Error> {
    let json = serde_json::to_string(&DeviceModel::DualSenseEdge)?;
    assert_snapshot!(json, @r#""DualSenseEdge""#);
    Ok(())
}
