//! Known i-menu item identifiers
//!
//! The table is incomplete by nature: new firmware adds functions, and IDs
//! that are not listed here are still valid slot contents.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Slot value reserved for "no function assigned"
pub const EMPTY_SLOT: u8 = 0;

/// Names of the i-menu item IDs known for one hardware generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCatalog {
    names: BTreeMap<u8, String>,
}

/// How a slot value reads against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotItem<'a> {
    Empty,
    Known(&'a str),
    Unknown(u8),
}

impl fmt::Display for SlotItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "(Empty)"),
            Self::Known(name) => write!(f, "{}", name),
            Self::Unknown(id) => write!(f, "Unknown ({})", id),
        }
    }
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u8, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn is_known(&self, id: u8) -> bool {
        id != EMPTY_SLOT && self.names.contains_key(&id)
    }

    pub fn name(&self, id: u8) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn describe(&self, id: u8) -> SlotItem<'_> {
        if id == EMPTY_SLOT {
            return SlotItem::Empty;
        }
        match self.name(id) {
            Some(name) => SlotItem::Known(name),
            None => SlotItem::Unknown(id),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }
}

impl FromIterator<(u8, String)> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = (u8, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Item names for the Z5 / Z5II family, from the camera reference guide.
pub fn z5_items() -> ItemCatalog {
    const ITEMS: &[(u8, &str)] = &[
        (1, "AF area mode"),
        (2, "AF tracking sensitivity"),
        (3, "Auto bracketing"),
        (4, "Bluetooth connection"),
        (5, "Monitor/viewfinder brightness"),
        (6, "Color space"),
        (7, "Choose image area"),
        (8, "Custom controls"),
        (9, "Shutter type"),
        (10, "Electronic front-curtain shutter"),
        (11, "Exposure compensation"),
        (12, "Exposure delay mode"),
        (13, "Flash compensation"),
        (14, "Flash mode"),
        (15, "Focus Mode"),
        (16, "Focus peaking"),
        (17, "HDR"),
        (18, "Highlight-weighted metering"),
        (19, "High ISO NR"),
        (20, "Image review"),
        (21, "Image Quality"),
        (22, "Image Size"),
        (23, "ISO display"),
        (24, "ISO sensitivity settings"),
        (25, "Long exposure NR"),
        (26, "Apply settings to live view"),
        (27, "Metering"),
        (28, "Matrix metering"),
        (29, "Multiple Exposure"),
        (30, "Peaking Highlights"),
        (31, "Set Picture Control"),
        (32, "Release Mode"),
        (33, "Silent Photography"),
        (34, "Split-screen display zoom"),
        (35, "Vibration Reduction"),
        (36, "White Balance"),
        (37, "White balance fine-tuning"),
        (38, "Wifi connection"),
        (39, "View memory card info"),
        (40, "Interval timer shooting"),
        (41, "Time-lapse movie"),
        (42, "Focus shift shooting"),
        (43, "Wind noise reduction"),
        (44, "Zebras"),
        (45, "Movie quality"),
        (46, "Movie frame size/frame rate"),
        (47, "Movie microphone"),
        (48, "Movie wind noise reduction"),
        (49, "HDMI output resolution"),
        (50, "Copyright information"),
        (51, "Group flash options"),
        (52, "FV lock"),
        (53, "BKT button assignment"),
        (54, "Fn1 button assignment"),
        (55, "Fn2 button assignment"),
        (56, "AF-assist illuminator"),
        (57, "Beep options"),
        (58, "Touch controls"),
        (59, "Eye-Detection AF"),
        (60, "Animal-Detection AF"),
        (61, "Subject tracking"),
        (62, "Wide-area AF (L)"),
        (63, "Wide-area AF (S)"),
        (64, "Auto-area AF"),
        (65, "Pinpoint AF"),
        (66, "Airplane mode"),
        (67, "Dynamic-area AF"),
        (68, "3D-tracking"),
        (70, "Tone mode"),
        (71, "Spot metering"),
        (72, "Center-weighted metering"),
        (73, "Flash sync speed"),
        (74, "Flash control mode"),
        (75, "Wireless flash control"),
        (76, "Built-in flash mode"),
        (77, "Commander mode"),
        (78, "Remote flash control"),
        (79, "TTL flash mode"),
        (80, "Manual flash mode"),
    ];

    ITEMS
        .iter()
        .map(|(id, name)| (*id, name.to_string()))
        .collect()
}
