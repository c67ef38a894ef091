pub const DEFAULT_NUM_CLASSES: usize = 100;
pub const DEFAULT_IN_CHANNELS: usize = 3;
pub const STEM_CHANNELS: usize = 64;
pub const STAGE_CHANNELS: [usize; 4] = [64, 128, 256, 512];
pub const SHALLOW_BLOCKS: [usize; 4] = [2, 2, 2, 2];
pub const DEEP_BLOCKS: [usize; 4] = [3, 4, 6, 3];
pub const DEFAULT_N_BINS: usize = 10;
pub const DEFAULT_PLOT_WIDTH: u32 = 1200;
pub const DEFAULT_PLOT_HEIGHT: u32 = 500;
