use anyhow::Result;
use otafetch_core::devices::DeviceList;
use std::path::Path;

/// Print the device list in a shell-friendly format for CI scripts.
///
/// One line per record, source order preserved: either the selected field
/// (empty line when a record lacks it) or the whole record as JSON.
pub fn execute(file: &Path, field: Option<&str>) -> Result<()> {
    tracing::debug!("Reporting devices from: {}", file.display());

    let list = DeviceList::from_path(file)?;

    for device in &list.devices {
        match field {
            Some(name) => println!("{}", device.field(name).unwrap_or_default()),
            None => println!("{}", device.to_json_line()),
        }
    }

    Ok(())
}
