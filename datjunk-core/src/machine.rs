/// Provenance and grouping context attached to every record.
///
/// `source_system_id` is the 0-based index of the input catalog the
/// record came from; lower values win name priority during merge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Machine {
    pub name: String,
    pub description: String,
    pub clone_of: Option<String>,
    pub rom_of: Option<String>,
    pub sample_of: Option<String>,
    pub year: Option<String>,
    pub manufacturer: Option<String>,
    pub comment: Option<String>,
    pub is_bios: bool,
    pub board: Option<String>,
    pub source_system_id: i32,
    pub source_system_name: String,
    pub source_id: i32,
    pub source_name: String,
}

impl Machine {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: name.clone(),
            name,
            ..Self::default()
        }
    }

    /// Tag this machine with the catalog it was read from.
    pub fn with_source(mut self, system_id: i32, system_name: impl Into<String>) -> Self {
        self.source_system_id = system_id;
        self.source_system_name = system_name.into();
        self
    }

    /// True when both machines came from the same `(system, source)` pair.
    pub fn same_source(&self, other: &Machine) -> bool {
        self.source_system_id == other.source_system_id && self.source_id == other.source_id
    }
}
