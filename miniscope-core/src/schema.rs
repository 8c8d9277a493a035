use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    IntegerArray,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Allow-list of device metadata fields recognized by a container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSchema {
    pub fields: Vec<FieldSpec>,
}

impl DeviceSchema {
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = (S, FieldKind)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, kind)| FieldSpec {
                    name: name.into(),
                    kind,
                })
                .collect(),
        }
    }

    pub fn kind_of(&self, field: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.name == field).map(|f| f.kind)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.kind_of(field).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl Default for DeviceSchema {
    /// Fields of the Miniscope device type.
    fn default() -> Self {
        use FieldKind::*;
        Self::new([
            ("name", Text),
            ("description", Text),
            ("manufacturer", Text),
            ("version", Text),
            ("deviceType", Text),
            ("compression", Text),
            ("frameRate", Text),
            ("framesPerFile", Integer),
            ("gain", Float),
            ("led0", Integer),
            ("ewl", Integer),
            ("excitation", Integer),
            ("msCamExposure", Integer),
            ("ROI", IntegerArray),
        ])
    }
}
