//! Controller button-mapping table.
//!
//! Each (logical NES device, physical console controller) pair owns an ordered
//! list of [`BUTTON_SLOTS`] assignment codes.  A code is the raw button bitmask
//! reported by the console's input driver for that controller; `0` means the
//! slot is unassigned.
//!
//! The table is a fixed-size array addressed only through the
//! [`LogicalDevice`] and [`PhysicalController`] enums, so lookups cannot go out
//! of range.

/// Number of button slots per mapping block.
pub const BUTTON_SLOTS: usize = 12;

/// Assignment code meaning "no button bound to this slot".
pub const UNASSIGNED: u32 = 0;

/// Emulated NES input device a mapping drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalDevice {
    Pad,
    Zapper,
}

impl LogicalDevice {
    pub const ALL: [LogicalDevice; 2] = [LogicalDevice::Pad, LogicalDevice::Zapper];

    fn index(self) -> usize {
        match self {
            LogicalDevice::Pad => 0,
            LogicalDevice::Zapper => 1,
        }
    }
}

/// Physical controller attached to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalController {
    GameCubePad,
    Wiimote,
    Classic,
    WiiUPro,
    WiiUGamepad,
    Nunchuk,
}

impl PhysicalController {
    pub const ALL: [PhysicalController; 6] = [
        PhysicalController::GameCubePad,
        PhysicalController::Wiimote,
        PhysicalController::Classic,
        PhysicalController::WiiUPro,
        PhysicalController::WiiUGamepad,
        PhysicalController::Nunchuk,
    ];

    fn index(self) -> usize {
        match self {
            PhysicalController::GameCubePad => 0,
            PhysicalController::Wiimote => 1,
            PhysicalController::Classic => 2,
            PhysicalController::WiiUPro => 3,
            PhysicalController::WiiUGamepad => 4,
            PhysicalController::Nunchuk => 5,
        }
    }
}

// ── Driver button codes ───────────────────────────────────────────────────────

mod gc {
    pub const LEFT: u32 = 0x0001;
    pub const RIGHT: u32 = 0x0002;
    pub const DOWN: u32 = 0x0004;
    pub const UP: u32 = 0x0008;
    pub const Z: u32 = 0x0010;
    pub const R: u32 = 0x0020;
    pub const L: u32 = 0x0040;
    pub const A: u32 = 0x0100;
    pub const B: u32 = 0x0200;
    pub const X: u32 = 0x0400;
    pub const Y: u32 = 0x0800;
    pub const START: u32 = 0x1000;
}

mod wiimote {
    pub const TWO: u32 = 0x0001;
    pub const ONE: u32 = 0x0002;
    pub const B: u32 = 0x0004;
    pub const A: u32 = 0x0008;
    pub const MINUS: u32 = 0x0010;
    pub const HOME: u32 = 0x0080;
    pub const LEFT: u32 = 0x0100;
    pub const RIGHT: u32 = 0x0200;
    pub const DOWN: u32 = 0x0400;
    pub const UP: u32 = 0x0800;
    pub const PLUS: u32 = 0x1000;
    pub const NUNCHUK_Z: u32 = 0x0001 << 16;
    pub const NUNCHUK_C: u32 = 0x0002 << 16;
}

mod classic {
    pub const UP: u32 = 0x0001 << 16;
    pub const LEFT: u32 = 0x0002 << 16;
    pub const ZR: u32 = 0x0004 << 16;
    pub const X: u32 = 0x0008 << 16;
    pub const A: u32 = 0x0010 << 16;
    pub const Y: u32 = 0x0020 << 16;
    pub const B: u32 = 0x0040 << 16;
    pub const ZL: u32 = 0x0080 << 16;
    pub const PLUS: u32 = 0x0400 << 16;
    pub const HOME: u32 = 0x0800 << 16;
    pub const MINUS: u32 = 0x1000 << 16;
    pub const FULL_L: u32 = 0x2000 << 16;
    pub const DOWN: u32 = 0x4000 << 16;
    pub const RIGHT: u32 = 0x8000 << 16;
}

type Block = [u32; BUTTON_SLOTS];

const PAD_GAMECUBE: Block = [
    gc::A, gc::B, gc::Z, gc::START, gc::UP, gc::DOWN, gc::LEFT, gc::RIGHT, gc::L, gc::R, gc::Y,
    gc::X,
];

// Wiimote held sideways: the d-pad is rotated a quarter turn.
const PAD_WIIMOTE: Block = [
    wiimote::TWO,
    wiimote::ONE,
    wiimote::MINUS,
    wiimote::PLUS,
    wiimote::RIGHT,
    wiimote::LEFT,
    wiimote::UP,
    wiimote::DOWN,
    wiimote::A,
    wiimote::HOME,
    UNASSIGNED,
    UNASSIGNED,
];

const PAD_CLASSIC: Block = [
    classic::A,
    classic::B,
    classic::MINUS,
    classic::PLUS,
    classic::UP,
    classic::DOWN,
    classic::LEFT,
    classic::RIGHT,
    classic::FULL_L,
    classic::HOME,
    classic::X,
    classic::Y,
];

const PAD_NUNCHUK: Block = [
    wiimote::A,
    wiimote::B,
    wiimote::MINUS,
    wiimote::PLUS,
    wiimote::UP,
    wiimote::DOWN,
    wiimote::LEFT,
    wiimote::RIGHT,
    wiimote::NUNCHUK_Z,
    wiimote::HOME,
    wiimote::NUNCHUK_C,
    UNASSIGNED,
];

// The Wii U controllers report through the classic-controller button layout.
const PAD_WIIU: Block = [
    classic::A,
    classic::B,
    classic::MINUS,
    classic::PLUS,
    classic::UP,
    classic::DOWN,
    classic::LEFT,
    classic::RIGHT,
    classic::ZL,
    classic::HOME,
    classic::X,
    classic::ZR,
];

const ZAPPER_GAMECUBE: Block = [
    gc::A, gc::B, UNASSIGNED, UNASSIGNED, UNASSIGNED, UNASSIGNED, UNASSIGNED, UNASSIGNED, gc::L,
    gc::R, UNASSIGNED, UNASSIGNED,
];

const ZAPPER_WIIMOTE: Block = [
    wiimote::B,
    wiimote::A,
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
    UNASSIGNED,
    wiimote::MINUS,
    wiimote::HOME,
    UNASSIGNED,
    UNASSIGNED,
];

// ── ButtonMap ─────────────────────────────────────────────────────────────────

const LOGICAL_COUNT: usize = LogicalDevice::ALL.len();
const PHYSICAL_COUNT: usize = PhysicalController::ALL.len();

/// Button assignments for every (logical device, physical controller) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonMap {
    table: [[Block; PHYSICAL_COUNT]; LOGICAL_COUNT],
}

impl ButtonMap {
    /// Table with every slot unassigned.
    pub fn unassigned() -> Self {
        Self {
            table: [[[UNASSIGNED; BUTTON_SLOTS]; PHYSICAL_COUNT]; LOGICAL_COUNT],
        }
    }

    /// The assignments for one mapping block.
    pub fn slots(&self, device: LogicalDevice, controller: PhysicalController) -> &Block {
        &self.table[device.index()][controller.index()]
    }

    /// Mutable assignments for one mapping block.
    pub fn slots_mut(
        &mut self,
        device: LogicalDevice,
        controller: PhysicalController,
    ) -> &mut Block {
        &mut self.table[device.index()][controller.index()]
    }

    /// Restores the stock mapping for every block.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        let mut map = Self::unassigned();
        let pad = LogicalDevice::Pad;
        *map.slots_mut(pad, PhysicalController::GameCubePad) = PAD_GAMECUBE;
        *map.slots_mut(pad, PhysicalController::Wiimote) = PAD_WIIMOTE;
        *map.slots_mut(pad, PhysicalController::Classic) = PAD_CLASSIC;
        *map.slots_mut(pad, PhysicalController::WiiUPro) = PAD_WIIU;
        *map.slots_mut(pad, PhysicalController::WiiUGamepad) = PAD_WIIU;
        *map.slots_mut(pad, PhysicalController::Nunchuk) = PAD_NUNCHUK;
        let zapper = LogicalDevice::Zapper;
        *map.slots_mut(zapper, PhysicalController::GameCubePad) = ZAPPER_GAMECUBE;
        *map.slots_mut(zapper, PhysicalController::Wiimote) = ZAPPER_WIIMOTE;
        map
    }
}
