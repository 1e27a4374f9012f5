use std::fs;
use std::path::PathBuf;

use encoding_rs::GBK;
use pointgen_core::DeviceType;
use pointgen_generate::{GenerationContext, GenerationError, load_devices};

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("pointgen_load_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn ctx() -> GenerationContext {
    GenerationContext::new(&DeviceType::Siemens)
}

#[test]
fn loads_utf8_with_bom_by_column_name() {
    let dir = temp_dir("bom");
    let path = dir.join("devices.csv");
    let content = "\u{feff}拼接地址,设备描述,设备代号\r\n100,1#提升泵,P01\r\n200,2#提升泵,P02\r\n";
    fs::write(&path, content).expect("write devices");

    let devices = load_devices(&path, &ctx()).expect("load devices");

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].code, "P01");
    assert_eq!(devices[0].description, "1#提升泵");
    assert_eq!(devices[0].base_offset, "100");
    assert_eq!(devices[1].code, "P02");
}

#[test]
fn falls_back_to_gbk() {
    let dir = temp_dir("gbk");
    let path = dir.join("devices.csv");
    let (bytes, _, had_errors) = GBK.encode("设备代号,设备描述,拼接地址\r\nV01,进水阀,36\r\n");
    assert!(!had_errors);
    fs::write(&path, &bytes).expect("write devices");

    let devices = load_devices(&path, &ctx()).expect("load devices");

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].code, "V01");
    assert_eq!(devices[0].description, "进水阀");
    assert_eq!(devices[0].base_offset, "36");
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let dir = temp_dir("binary");
    let path = dir.join("devices.csv");
    fs::write(&path, [0xff_u8, 0xfe, 0x81, 0x20]).expect("write devices");

    let err = load_devices(&path, &ctx()).unwrap_err();
    assert!(matches!(err, GenerationError::Decode { .. }));
}

#[test]
fn missing_column_is_reported_by_name() {
    let dir = temp_dir("missing");
    let path = dir.join("devices.csv");
    fs::write(&path, "设备代号,设备名称,拼接地址\nP01,泵,100\n").expect("write devices");

    let err = load_devices(&path, &ctx()).unwrap_err();
    match err {
        GenerationError::MissingColumn { column, .. } => assert_eq!(column, "设备描述"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_inputs_yield_no_devices() {
    let dir = temp_dir("empty");

    let empty = dir.join("empty.csv");
    fs::write(&empty, "").expect("write empty");
    assert!(load_devices(&empty, &ctx()).expect("load empty").is_empty());

    let header_only = dir.join("header.csv");
    fs::write(&header_only, "设备代号,设备描述,拼接地址\r\n").expect("write header");
    assert!(
        load_devices(&header_only, &ctx())
            .expect("load header only")
            .is_empty()
    );
}

#[test]
fn short_rows_fill_missing_cells_with_blanks() {
    let dir = temp_dir("short");
    let path = dir.join("devices.csv");
    fs::write(&path, "设备代号,设备描述,拼接地址\nP01,泵\n").expect("write devices");

    let devices = load_devices(&path, &ctx()).expect("load devices");
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].base_offset, "");
}
