//! Column layout of the generated point table.
//!
//! The header is consumed by downstream configuration tools and must be kept
//! byte-for-byte. Rows are assembled section by section in header order, so a
//! change in any block width shows up as a compile error instead of shifted
//! columns.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::types::PointKind;

/// Output header, in column order.
pub const HEADER: [&str; 63] = [
    ";IO#FS0序号",
    "所属通道",
    "驱动",
    "所属设备",
    "点类型",
    "点名",
    "描述",
    "初始值",
    "单位编码",
    "引用(云)标签",
    "提交",
    "标记",
    "值域",
    "权限",
    "采集周期",
    "n[0]",
    "n[1]",
    "n[2]",
    "n[3]",
    "n[4]",
    "n[5]",
    "n[6]",
    "n[7]",
    "n[8]",
    "n[9]",
    "n[10]",
    "n[11]",
    "s[0]",
    "s[1]",
    "s[2]",
    "s[3]",
    "s[4]",
    "s[5]",
    "s[6]",
    "s[7]",
    "s[8]",
    "s[9]",
    "s[10]",
    "s[11]",
    "opc.vt",
    "opc.item",
    "opc.acc",
    "io.kind",
    "io.mode",
    "io.obj",
    "io.path",
    "模拟量>>>取绝对值",
    "CTPT",
    "系数标记",
    "系数倍率",
    "基数",
    "基础倍率",
    "阈值开关",
    "阈值",
    "量程变换",
    "裸数据上限",
    "裸数据下限",
    "量程上限",
    "量程下限",
    "数字量>>>采集取反",
    "真值描述",
    "假值描述",
    "防抖周期",
];

pub const COLUMN_COUNT: usize = HEADER.len();

/// Status/unit/default columns, `初始值` through `n[0]`.
pub const STATUS_DEFAULTS: [&str; 9] = ["", "", "", "0", "0", "0", "0", "1000", "3"];

/// Alarm/range/permission defaults, `n[5]` through `阈值开关`.
pub const ALARM_DEFAULTS: [&str; 33] = [
    "0", "0", "0", "0", "0", "0", "0", "", "", "", "", "", "", "", "", "", "", "", "", "0", "",
    "", "0", "0", "", "", "0", "0", "0", "0", "0", "1", "0",
];

/// Datatype columns for analog points (`"1"`).
pub const ANALOG_BLOCK: [&str; 10] = [
    "0",
    "1",
    "1000000000",
    "0",
    "1000000000",
    "0",
    "0",
    "合",
    "分",
    "0",
];

/// Datatype columns for digital points (`"2"`).
pub const DIGITAL_BLOCK: [&str; 10] = ["0.001", "0", "100", "0", "1000", "0", "0", "", "", "0"];

const BLANK_BLOCK: [&str; 10] = [""; 10];

/// Named sections of a row, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Sequence id, channel, drive, device, point type, tag name, description.
    Identity,
    StatusDefaults,
    /// `n[1]`..`n[4]`.
    Address,
    AlarmDefaults,
    Datatype,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Identity,
        Section::StatusDefaults,
        Section::Address,
        Section::AlarmDefaults,
        Section::Datatype,
    ];

    pub const fn width(self) -> usize {
        match self {
            Section::Identity => IDENTITY_WIDTH,
            Section::StatusDefaults => STATUS_DEFAULTS.len(),
            Section::Address => ADDRESS_WIDTH,
            Section::AlarmDefaults => ALARM_DEFAULTS.len(),
            Section::Datatype => ANALOG_BLOCK.len(),
        }
    }

    /// Header index of the first column in this section.
    pub const fn start(self) -> usize {
        match self {
            Section::Identity => 0,
            Section::StatusDefaults => Section::Identity.end(),
            Section::Address => Section::StatusDefaults.end(),
            Section::AlarmDefaults => Section::Address.end(),
            Section::Datatype => Section::AlarmDefaults.end(),
        }
    }

    pub const fn end(self) -> usize {
        self.start() + self.width()
    }

    pub fn columns(self) -> Range<usize> {
        self.start()..self.end()
    }
}

const IDENTITY_WIDTH: usize = 7;
const ADDRESS_WIDTH: usize = 4;

const _: () = assert!(Section::Datatype.end() == COLUMN_COUNT);
const _: () = assert!(DIGITAL_BLOCK.len() == ANALOG_BLOCK.len());

/// Datatype block selected for a point kind.
pub fn datatype_block(kind: PointKind) -> &'static [&'static str; 10] {
    match kind {
        PointKind::Analog => &ANALOG_BLOCK,
        PointKind::Digital => &DIGITAL_BLOCK,
        PointKind::Other => &BLANK_BLOCK,
    }
}

/// Descriptive columns of a point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub channel: String,
    pub drive: String,
    pub device_name: String,
    pub point_type: String,
    pub tag_name: String,
    pub description: String,
}

/// Protocol addressing written to `n[1]`..`n[4]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub n1: String,
    pub n2: String,
    pub n3: String,
    pub n4: String,
}

impl Address {
    /// All four fields empty.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// A complete point-table row with one field per header column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    fields: Vec<String>,
}

impl OutputRow {
    /// Assemble a row from its variable parts and the fixed blocks.
    pub fn assemble(identity: Identity, address: Address, kind: PointKind) -> Self {
        let mut fields = Vec::with_capacity(COLUMN_COUNT);

        // Sequence id is left for the import tool to assign.
        fields.push(String::new());
        fields.push(identity.channel);
        fields.push(identity.drive);
        fields.push(identity.device_name);
        fields.push(identity.point_type);
        fields.push(identity.tag_name);
        fields.push(identity.description);
        debug_assert_eq!(fields.len(), Section::Identity.end());

        extend_literal(&mut fields, &STATUS_DEFAULTS);

        fields.push(address.n1);
        fields.push(address.n2);
        fields.push(address.n3);
        fields.push(address.n4);
        debug_assert_eq!(fields.len(), Section::Address.end());

        extend_literal(&mut fields, &ALARM_DEFAULTS);
        extend_literal(&mut fields, datatype_block(kind));
        debug_assert_eq!(fields.len(), COLUMN_COUNT);

        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field under the given header name.
    pub fn get(&self, column: &str) -> Option<&str> {
        column_index(column).map(|idx| self.fields[idx].as_str())
    }

    pub fn section(&self, section: Section) -> &[String] {
        &self.fields[section.columns()]
    }
}

impl TryFrom<Vec<String>> for OutputRow {
    type Error = Error;

    fn try_from(fields: Vec<String>) -> Result<Self> {
        if fields.len() != COLUMN_COUNT {
            return Err(Error::RowWidth {
                expected: COLUMN_COUNT,
                actual: fields.len(),
            });
        }
        Ok(Self { fields })
    }
}

/// Header index of a column name.
pub fn column_index(column: &str) -> Option<usize> {
    HEADER.iter().position(|name| *name == column)
}

fn extend_literal(fields: &mut Vec<String>, block: &[&str]) {
    fields.extend(block.iter().map(|value| (*value).to_string()));
}
