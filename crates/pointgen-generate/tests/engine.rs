use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use pointgen_core::{DeviceType, GenerationInputs, HEADER, TemplateEntry};
use pointgen_generate::{
    GenerateOptions, GenerationContext, GenerationError, OutputEncoding, PointTableEngine,
    StaticTemplates, WriteOptions,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("pointgen_engine_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn motor_template() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry {
            name: ".ON".to_string(),
            desc: "运行".to_string(),
            point_type: "2".to_string(),
            add_byte: "0".to_string(),
            add_bit: "0".to_string(),
        },
        TemplateEntry {
            name: ".HZ".to_string(),
            desc: "频率".to_string(),
            point_type: "1".to_string(),
            add_byte: "2".to_string(),
            add_bit: "0".to_string(),
        },
    ]
}

fn inputs(device_type: DeviceType) -> GenerationInputs {
    GenerationInputs {
        channel: "S127".to_string(),
        device_name: "PLC1".to_string(),
        drive: "PLC_SIEMENS_S7_1200_TCP".to_string(),
        db_num: "12".to_string(),
        device_type,
    }
}

fn engine(base_dir: PathBuf) -> PointTableEngine {
    PointTableEngine::new(GenerateOptions {
        base_dir,
        write: WriteOptions {
            encoding: OutputEncoding::Utf8,
        },
        ..GenerateOptions::default()
    })
}

#[test]
fn generates_point_table_end_to_end() {
    init_tracing();
    let base_dir = temp_dir("e2e");
    let devices = base_dir.join("devices.csv");
    fs::write(
        &devices,
        "设备代号,设备描述,拼接地址\nP01,1#泵,0\nP02,2#泵,20\nP03,3#泵,40\n",
    )
    .expect("write devices");
    let provider = StaticTemplates::new().with(DeviceType::Siemens, motor_template());

    let result = engine(base_dir.clone())
        .run(&devices, &provider, &inputs(DeviceType::Siemens))
        .expect("generate");

    assert_eq!(result.devices, 3);
    assert_eq!(result.template_entries, 2);
    assert_eq!(result.rows, 6);
    assert!(result.output_path.starts_with(base_dir.join("output")));

    let text = fs::read_to_string(&result.output_path).expect("read output");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let header = reader.headers().expect("header").clone();
    assert_eq!(header.iter().collect::<Vec<_>>(), HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("records");
    assert_eq!(records.len(), 6);
    let p03_hz = &records[5];
    assert_eq!(&p03_hz[5], "P03.HZ");
    assert_eq!(&p03_hz[16], "42");
    assert_eq!(&p03_hz[17], "12");
}

#[test]
fn empty_device_list_writes_header_only() {
    init_tracing();
    let base_dir = temp_dir("empty");
    let devices = base_dir.join("devices.csv");
    fs::write(&devices, "设备代号,设备描述,拼接地址\n").expect("write devices");
    let provider = StaticTemplates::new().with(DeviceType::Siemens, motor_template());

    let result = engine(base_dir)
        .run(&devices, &provider, &inputs(DeviceType::Siemens))
        .expect("generate");

    assert_eq!(result.rows, 0);
    let text = fs::read_to_string(&result.output_path).expect("read output");
    assert_eq!(text, format!("{}\r\n", HEADER.join(",")));
}

#[test]
fn invalid_offset_aborts_before_writing() {
    let base_dir = temp_dir("invalid");
    let devices = base_dir.join("devices.csv");
    fs::write(&devices, "设备代号,设备描述,拼接地址\nP01,1#泵,abc\n").expect("write devices");
    let provider = StaticTemplates::new().with(DeviceType::Siemens, motor_template());

    let err = engine(base_dir.clone())
        .run(&devices, &provider, &inputs(DeviceType::Siemens))
        .unwrap_err();

    assert!(matches!(
        err,
        GenerationError::InvalidAddress { ref device, .. } if device == "P01"
    ));
    assert!(!base_dir.join("output").exists());
}

#[test]
fn supplied_context_controls_file_name() {
    let base_dir = temp_dir("ctx");
    let devices = base_dir.join("devices.csv");
    fs::write(&devices, "设备代号,设备描述,拼接地址\nA1,阀,8\n").expect("write devices");
    let provider = StaticTemplates::new().with(DeviceType::Ab, motor_template());
    let timestamp = NaiveDate::from_ymd_opt(2024, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .expect("valid timestamp");
    let ctx = GenerationContext::new(&DeviceType::Ab).with_timestamp(timestamp);

    let result = engine(base_dir.clone())
        .run_with_context(&ctx, &devices, &provider, &inputs(DeviceType::Ab))
        .expect("generate");

    assert_eq!(
        result.output_path,
        base_dir.join("output").join("AB_20241231235959.csv")
    );
}

#[test]
fn strict_mode_refuses_empty_inputs() {
    let base_dir = temp_dir("strict");
    let devices = base_dir.join("devices.csv");
    fs::write(&devices, "设备代号,设备描述,拼接地址\n").expect("write devices");
    let provider = StaticTemplates::new().with(DeviceType::Siemens, motor_template());
    let engine = PointTableEngine::new(GenerateOptions {
        base_dir: base_dir.clone(),
        allow_empty: false,
        ..GenerateOptions::default()
    });

    let err = engine
        .run(&devices, &provider, &inputs(DeviceType::Siemens))
        .unwrap_err();
    assert!(matches!(err, GenerationError::EmptyInput("device list")));

    fs::write(&devices, "设备代号,设备描述,拼接地址\nP01,1#泵,0\n").expect("write devices");
    let empty_template = StaticTemplates::new().with(DeviceType::Siemens, Vec::new());
    let err = engine
        .run(&devices, &empty_template, &inputs(DeviceType::Siemens))
        .unwrap_err();
    assert!(matches!(err, GenerationError::EmptyInput("template")));
    assert!(!base_dir.join("output").exists());
}
