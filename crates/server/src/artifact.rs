/// Fresh name for a generated deck: `<YYYYMMDDHHMMSS>_<uuid-v4>.pptx`.
///
/// The timestamp is local time; the UUID keeps names unique within a second.
pub fn artifact_name() -> String {
    format!(
        "{}_{}.pptx",
        chrono::Local::now().format("%Y%m%d%H%M%S"),
        uuid::Uuid::new_v4()
    )
}
