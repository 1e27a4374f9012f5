use pointgen_core::{DeviceType, GenerationInputs, PointKind, TemplateEntry};

#[test]
fn template_entry_uses_template_file_keys() {
    let entry = TemplateEntry {
        name: ".ON".to_string(),
        desc: "运行状态".to_string(),
        point_type: "2".to_string(),
        add_byte: "0".to_string(),
        add_bit: "1".to_string(),
    };

    let json = serde_json::to_string(&entry).expect("serialize entry");
    assert_eq!(
        json,
        r#"{"name":".ON","desc":"运行状态","type":"2","addbyte":"0","addbit":"1"}"#
    );

    let parsed: TemplateEntry = serde_json::from_str(&json).expect("parse entry");
    assert_eq!(parsed, entry);
    assert_eq!(parsed.kind(), PointKind::Digital);
}

#[test]
fn device_type_serializes_as_tag() {
    let inputs = GenerationInputs {
        channel: "S127".to_string(),
        device_name: "PLC1".to_string(),
        drive: "AB-ControlLogixTCP".to_string(),
        db_num: "3".to_string(),
        device_type: DeviceType::Ab,
    };

    let value = serde_json::to_value(&inputs).expect("serialize inputs");
    assert_eq!(value["device_type"], "AB");

    let custom: DeviceType = serde_json::from_str(r#""MODBUS""#).expect("parse custom tag");
    assert_eq!(custom, DeviceType::Other("MODBUS".to_string()));

    let blank = serde_json::from_str::<DeviceType>(r#""""#);
    assert!(blank.is_err());
}
