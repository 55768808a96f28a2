//! The attribute catalog.
//!
//! A [`Catalog`] is an immutable, ordered table of [`AttributeEntry`] values
//! plus a case-folded name index. It is built once and only ever read, so a
//! `&'static Catalog` can be shared freely between threads.

use super::entry::{AttributeEntry, ValueType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Read-only, ordered lookup table of attribute definitions.
#[derive(Debug)]
pub struct Catalog {
    entries: &'static [AttributeEntry],
    index: HashMap<String, usize>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::new(BUILTIN_ATTRIBUTES));

impl Catalog {
    /// Builds a catalog over `entries`. If two entries share a name (ignoring
    /// case) the first one wins.
    pub fn new(entries: &'static [AttributeEntry]) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.name.to_ascii_lowercase()).or_insert(i);
        }
        Self { entries, index }
    }

    /// The process-wide catalog of known attributes.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Case-insensitive lookup by attribute name.
    pub fn by_name(&self, name: &str) -> Option<&'static AttributeEntry> {
        let entries = self.entries;
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| &entries[i])
    }

    /// Lookup by protocol id and value type.
    pub fn by_id(&self, id: u32, value_type: ValueType) -> Option<&'static AttributeEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id && e.value_type == value_type)
    }

    /// All entries, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &'static AttributeEntry> {
        self.entries.iter()
    }

    /// Entries visited by a "query all" sweep.
    pub fn query_all(&self) -> impl Iterator<Item = &'static AttributeEntry> {
        self.iter().filter(|e| !e.flags.no_query_all)
    }

    /// Entries that may be written to a configuration file.
    pub fn config_writable(&self) -> impl Iterator<Item = &'static AttributeEntry> {
        self.iter().filter(|e| !e.flags.no_config_write)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use ValueType::{Float, Integer, SdiCsc};

/// Built-in attribute table.
pub const BUILTIN_ATTRIBUTES: &[AttributeEntry] = &[
    // Image quality
    AttributeEntry::new("FlatpanelScaling", 2, Integer, "Controls the flat panel scaling mode."),
    AttributeEntry::new("FlatpanelDithering", 3, Integer, "Controls flat panel dithering."),
    AttributeEntry::new("DigitalVibrance", 4, Integer, "Sets the digital vibrance level."),
    AttributeEntry::new("Brightness", 5, Integer, "Sets the display brightness."),
    AttributeEntry::new("Contrast", 6, Integer, "Sets the display contrast."),
    AttributeEntry::new("ImageSharpening", 7, Integer, "Adjusts the amount of image sharpening."),
    AttributeEntry::new("Dithering", 8, Integer, "Controls dithering on the display."),
    AttributeEntry::new("ColorSpace", 9, Integer, "Selects the display color space."),
    AttributeEntry::new("ColorRange", 10, Integer, "Selects full or limited color range."),
    // Color correction; the bracket names a color channel
    AttributeEntry::new("Gamma", 11, Float, "Gamma correction; [red|green|blue|all] selects the channel.")
        .hijack_display_device(),
    AttributeEntry::new("RedGamma", 12, Float, "Gamma correction for the red channel."),
    AttributeEntry::new("GreenGamma", 13, Float, "Gamma correction for the green channel."),
    AttributeEntry::new("BlueGamma", 14, Float, "Gamma correction for the blue channel."),
    // OpenGL
    AttributeEntry::new("SyncToVBlank", 20, Integer, "Synchronizes OpenGL swaps to the vertical blank."),
    AttributeEntry::new("LogAniso", 21, Integer, "Anisotropic filtering level."),
    AttributeEntry::new("FSAA", 22, Integer, "Full scene antialiasing mode."),
    AttributeEntry::new("TextureSharpen", 23, Integer, "Sharpens textures when FSAA is enabled."),
    AttributeEntry::new("AllowFlipping", 24, Integer, "Allows OpenGL to swap by flipping."),
    AttributeEntry::new("Stereo", 25, Integer, "Stereo mode.").no_config_write(),
    // System information
    AttributeEntry::new("BusType", 30, Integer, "Type of bus connecting the GPU.").no_config_write(),
    AttributeEntry::new("VideoRam", 31, Integer, "Video memory in kilobytes.").no_config_write(),
    AttributeEntry::new("Irq", 32, Integer, "Interrupt line used by the GPU.").no_config_write(),
    AttributeEntry::new("GPUCoreTemp", 33, Integer, "GPU core temperature in degrees C.").no_config_write(),
    AttributeEntry::new("NvidiaDriverVersion", 34, ValueType::String, "Installed driver version.").no_config_write(),
    AttributeEntry::new("GpuUUID", 35, ValueType::String, "Globally unique GPU identifier.").no_config_write(),
    // Display configuration
    AttributeEntry::new("ConnectedDisplays", 40, Integer, "Display devices connected to the GPU.")
        .display_mask()
        .no_config_write(),
    AttributeEntry::new("EnabledDisplays", 41, Integer, "Display devices enabled on the X screen.")
        .display_mask()
        .no_config_write(),
    AttributeEntry::new("AssociatedDisplays", 42, Integer, "Display devices associated with the X screen.")
        .display_mask(),
    AttributeEntry::new("SwitchToDisplays", 43, Integer, "Switches the X screen to the given displays, or all.")
        .switch_display()
        .no_config_write()
        .no_query_all(),
    AttributeEntry::new("XVideoSyncToDisplayID", 44, Integer, "Display that XVideo syncs to.").display_id(),
    AttributeEntry::new("RefreshRate", 45, Integer, "Refresh rate in 0.01 Hz.")
        .hz100()
        .no_config_write(),
    AttributeEntry::new("RefreshRate3", 46, Integer, "Refresh rate in 0.001 Hz.")
        .hz1000()
        .no_config_write(),
    AttributeEntry::new("CurrentMetaMode", 47, ValueType::String, "The MetaMode currently in use.").no_config_write(),
    AttributeEntry::new("XineramaInfoOrder", 48, ValueType::String, "Order of displays in Xinerama information."),
    // Clocks and cooling
    AttributeEntry::new("GPUCurrentClockFreqs", 50, Integer, "Current GPU and memory clocks, as gpu,memory.")
        .packed()
        .no_config_write(),
    AttributeEntry::new("GPU3DClockFreqs", 51, Integer, "3D clock frequencies, as gpu,memory.").packed(),
    AttributeEntry::new("GPUTargetFanSpeed", 52, Integer, "Target fan speed in percent.").no_zero(),
    AttributeEntry::new("ThermalSensorReading", 53, Integer, "Thermal sensor reading.").no_config_write(),
    // Frame lock
    AttributeEntry::new("FrameLockMaster", 60, Integer, "Display device used as frame lock master.")
        .framelock()
        .display_mask(),
    AttributeEntry::new("FrameLockPolarity", 61, Integer, "Edge used for the house sync signal.").framelock(),
    AttributeEntry::new("FrameLockSyncDelay", 62, Integer, "Delay between sync and frame.").framelock(),
    AttributeEntry::new("FrameLockSyncInterval", 63, Integer, "Number of frames between syncs.").framelock(),
    AttributeEntry::new("FrameLockSyncRate", 64, Integer, "Frame lock sync rate in 0.001 Hz.")
        .framelock()
        .hz1000()
        .no_config_write(),
    // SDI output
    AttributeEntry::new("GvoSyncMode", 70, Integer, "SDI output sync mode.").sdi(),
    AttributeEntry::new("GvoDataFormat", 71, Integer, "SDI output data format.").sdi(),
    AttributeEntry::new("GvoCSCMatrix", 72, SdiCsc, "SDI color space conversion matrix.")
        .sdi()
        .no_config_write()
        .no_query_all(),
    // Client preferences
    AttributeEntry::new("ToolTips", 100, Integer, "Show tooltips in the GUI.").gui(),
    AttributeEntry::new("DisplayStatusBar", 101, Integer, "Show the GUI status bar.").gui(),
    AttributeEntry::new("SliderTextEntries", 102, Integer, "Show text entries next to sliders.").gui(),
    AttributeEntry::new("ShowQuitDialog", 103, Integer, "Confirm before quitting the GUI.").gui(),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_are_unique_ignoring_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.index.len(), catalog.len());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = Catalog::builtin();
        let a = catalog.by_name("Brightness").unwrap();
        let b = catalog.by_name("brightness").unwrap();
        let c = catalog.by_name("BRIGHTNESS").unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(std::ptr::eq(a, c));
        assert!(catalog.by_name("NoSuchThing").is_none());
    }

    #[test]
    fn test_lookup_by_id_respects_value_type() {
        let catalog = Catalog::builtin();
        let entry = catalog.by_id(12, ValueType::Float).unwrap();
        assert_eq!(entry.name, "RedGamma");
        assert!(catalog.by_id(12, ValueType::Integer).is_none());
    }

    #[test]
    fn test_query_all_skips_flagged_entries() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.query_all().map(|e| e.name).collect();
        assert!(!names.contains(&"GvoCSCMatrix"));
        assert!(!names.contains(&"SwitchToDisplays"));
        assert!(names.contains(&"Brightness"));
    }

    #[test]
    fn test_config_writable_skips_read_only_entries() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.config_writable().map(|e| e.name).collect();
        assert!(!names.contains(&"VideoRam"));
        assert!(names.contains(&"DigitalVibrance"));
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_entry() {
        static DUPES: &[AttributeEntry] = &[
            AttributeEntry::new("Foo", 1, Integer, ""),
            AttributeEntry::new("FOO", 2, Integer, ""),
        ];
        let catalog = Catalog::new(DUPES);
        assert_eq!(catalog.by_name("foo").unwrap().id, 1);
        assert_eq!(catalog.len(), 2);
    }
}
