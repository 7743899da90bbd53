use crate::resources::error::{
    Error, SerializeJsonSnafu, SerializeYamlSnafu, TemplateParseSnafu, TemplateRenderSnafu,
};
use prettytable::{format, Cell, Row, Table};
use serde::ser;
use snafu::ResultExt;
use tinytemplate::TinyTemplate;

const CELL_NO_CONTENT: &str = "<none>";
/// Placeholder for fields whose source object was not found.
pub const NOT_AVAILABLE: &str = "N/A";
/// Separates the fields of a table row.
pub const COLUMN_SEPARATOR: &str = "|";

/// Optional cells should display `CELL_NO_CONTENT` if None.
pub fn optional_cell<T: ToString>(field: Option<T>) -> String {
    field
        .map(|f| f.to_string())
        .unwrap_or_else(|| CELL_NO_CONTENT.to_string())
}

/// Fields missing from their source object should display `NOT_AVAILABLE`.
pub fn available_cell<T: ToString>(field: Option<T>) -> String {
    field
        .map(|f| f.to_string())
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

// Constants to store the table headers of the Tabular output formats.
pub const VOLUME_HEADERS: &str = "Node|Namespace|Name|csiVolumeAttachmentName|Status|Type|Version|Capacity|StorageClass|Attached|Access Mode";
pub const REPLICA_HEADERS: &str = "Name|Pool Instance|Status";

/// Builds the divider row for the given header, one dash per header character.
pub fn divider_row(header: &str, separator: &str) -> String {
    header
        .split(separator)
        .map(|title| "-".repeat(title.chars().count()))
        .collect::<Vec<_>>()
        .join(separator)
}

// render_table takes rows in which the fields are delimited by the separator and aligns every
// column to its widest field. The first row sets the column count, shorter rows are padded.
// Empty fields are shown as `CELL_NO_CONTENT`.
pub fn render_table(rows: &[String], separator: &str) -> String {
    let columns = rows
        .first()
        .map(|header| header.split(separator).count())
        .unwrap_or_default();
    let mut table = Table::new();
    // FORMAT_CLEAN has been set to remove table borders
    table.set_format(*format::consts::FORMAT_CLEAN);
    for row in rows {
        let mut fields: Vec<&str> = row.split(separator).map(str::trim).collect();
        if fields.len() < columns {
            fields.resize(columns, "");
        }
        let cells: Row = fields
            .into_iter()
            .map(|field| Cell::new(&optional_cell(Some(field).filter(|f| !f.is_empty()))))
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

// render_template substitutes the fields of `data` into the named template.
pub fn render_template<T>(name: &str, template: &str, data: &T) -> Result<String, Error>
where
    T: ser::Serialize,
{
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(name, template)
        .context(TemplateParseSnafu { name })?;
    tt.render(name, data).context(TemplateRenderSnafu { name })
}

// CreateRows trait to be implemented by Vec<`resource`> to create the rows.
pub trait CreateRows {
    fn create_rows(&self) -> Vec<String>;
}

// GetHeaderRow trait to be implemented by Vec<`resource`> to fetch the corresponding headers.
pub trait GetHeaderRow {
    fn get_header_row(&self) -> String;
}

// OutputFormat to be used as an enum to match the output from args.
#[derive(Debug, Clone, Copy, PartialEq, strum_macros::EnumString, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    None,
    Yaml,
    Json,
}

impl<T> CreateRows for Vec<T>
where
    T: CreateRows,
{
    fn create_rows(&self) -> Vec<String> {
        self.iter().flat_map(|i| i.create_rows()).collect()
    }
}

// GetHeaderRow trait to be implemented by Volume/Replica to fetch the corresponding headers.
impl<T> GetHeaderRow for Vec<T>
where
    T: GetHeaderRow,
{
    fn get_header_row(&self) -> String {
        self.get(0)
            .map(GetHeaderRow::get_header_row)
            .unwrap_or_default()
    }
}

/// Serializes `obj` as json or yaml, or for `OutputFormat::None` builds its table from the header,
/// a divider and its rows.
pub fn format_table<T>(output: &OutputFormat, obj: &T) -> Result<String, Error>
where
    T: ser::Serialize,
    T: CreateRows,
    T: GetHeaderRow,
{
    match output {
        OutputFormat::None => {
            let header = obj.get_header_row();
            let divider = divider_row(&header, COLUMN_SEPARATOR);
            let rows: Vec<String> = [header, divider]
                .into_iter()
                .chain(obj.create_rows())
                .collect();
            Ok(render_table(&rows, COLUMN_SEPARATOR))
        }
        _ => format_serialized(output, obj),
    }
}

/// Serializes `obj` as json or yaml. `OutputFormat::None` falls back to json.
pub fn format_serialized<T>(output: &OutputFormat, obj: &T) -> Result<String, Error>
where
    T: ser::Serialize,
{
    match output {
        OutputFormat::Yaml => serde_yaml::to_string(obj).context(SerializeYamlSnafu),
        OutputFormat::Json | OutputFormat::None => serde_json::to_string(obj)
            .map(|json| json + "\n")
            .context(SerializeJsonSnafu),
    }
}
