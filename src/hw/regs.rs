//! Register byte offsets of the VPE 1.x register file.
#![allow(dead_code)]

// VPCDC: fetch and crossbar
pub const VPCDC_FE0_SURFACE_CONFIG: u32 = 0x0040;
pub const VPCDC_FE0_CROSSBAR_CONFIG: u32 = 0x0044;
pub const VPCDC_FE0_VIEWPORT_START_CONFIG: u32 = 0x0048;
pub const VPCDC_FE0_VIEWPORT_DIMENSION_CONFIG: u32 = 0x004C;
pub const VPCDC_FE0_VIEWPORT_START_C_CONFIG: u32 = 0x0050;
pub const VPCDC_FE0_VIEWPORT_DIMENSION_C_CONFIG: u32 = 0x0054;
pub const VPCDC_BE0_P2B_CONFIG: u32 = 0x0080;
pub const VPCDC_BE0_GLOBAL_SYNC_CONFIG: u32 = 0x0084;

// VPCNVC: format conversion, keyer, input CSC
pub const VPCNVC_SURFACE_PIXEL_FORMAT: u32 = 0x0400;
pub const VPCNVC_FORMAT_CONTROL: u32 = 0x0404;
pub const VPCNVC_COLOR_KEYER_CONTROL: u32 = 0x0420;
pub const VPCNVC_COLOR_KEYER_ALPHA: u32 = 0x0424;
pub const VPCNVC_COLOR_KEYER_RED: u32 = 0x0428;
pub const VPCNVC_COLOR_KEYER_GREEN: u32 = 0x042C;
pub const VPCNVC_COLOR_KEYER_BLUE: u32 = 0x0430;
pub const VPCNVC_ALPHA_2BIT_LUT: u32 = 0x0434;
pub const VPCNVC_PRE_DEALPHA: u32 = 0x0438;
pub const VPCNVC_PRE_CSC_MODE: u32 = 0x043C;
/// First of six coefficient registers, two s2.13 values each.
pub const VPCNVC_PRE_CSC_C11_C12: u32 = 0x0440;

// VPDSCL: scaler
pub const VPDSCL_MODE: u32 = 0x0800;
pub const VPDSCL_TAP_CONTROL: u32 = 0x0804;
pub const VPDSCL_CONTROL: u32 = 0x0808;
pub const VPDSCL_2TAP_CONTROL: u32 = 0x080C;
pub const VPDSCL_MANUAL_REPLICATE_CONTROL: u32 = 0x0810;
pub const VPDSCL_HORZ_FILTER_SCALE_RATIO: u32 = 0x0814;
pub const VPDSCL_HORZ_FILTER_INIT: u32 = 0x0818;
pub const VPDSCL_HORZ_FILTER_SCALE_RATIO_C: u32 = 0x081C;
pub const VPDSCL_HORZ_FILTER_INIT_C: u32 = 0x0820;
pub const VPDSCL_VERT_FILTER_SCALE_RATIO: u32 = 0x0824;
pub const VPDSCL_VERT_FILTER_INIT: u32 = 0x0828;
pub const VPDSCL_VERT_FILTER_SCALE_RATIO_C: u32 = 0x082C;
pub const VPDSCL_VERT_FILTER_INIT_C: u32 = 0x0830;
pub const VPDSCL_COEF_RAM_TAP_SELECT: u32 = 0x0834;
pub const VPDSCL_COEF_RAM_TAP_DATA: u32 = 0x0838;
pub const VPDSCL_EXT_OVERSCAN_LEFT_RIGHT: u32 = 0x083C;
pub const VPDSCL_EXT_OVERSCAN_TOP_BOTTOM: u32 = 0x0840;
pub const VPOTG_H_BLANK: u32 = 0x0844;
pub const VPOTG_V_BLANK: u32 = 0x0848;
pub const VPDSCL_RECOUT_START: u32 = 0x084C;
pub const VPDSCL_RECOUT_SIZE: u32 = 0x0850;
pub const VPMPC_SIZE: u32 = 0x0854;
pub const VPLB_DATA_FORMAT: u32 = 0x0858;
pub const VPLB_MEMORY_CTRL: u32 = 0x085C;

// VPCM: color management
pub const VPCM_CONTROL: u32 = 0x0C00;
pub const VPCM_DGAM_CONTROL: u32 = 0x0C04;
pub const VPCM_GAMUT_REMAP_CONTROL: u32 = 0x0C08;
/// First of six coefficient registers, two s2.13 values each.
pub const VPCM_GAMUT_REMAP_C11_C12: u32 = 0x0C0C;
pub const VPCM_HDR_MULT_COEF: u32 = 0x0C24;
pub const VPCM_SHAPER_CONTROL: u32 = 0x0C28;
pub const VPCM_SHAPER_LUT_INDEX: u32 = 0x0C2C;
pub const VPCM_SHAPER_LUT_DATA: u32 = 0x0C30;
pub const VPCM_3DLUT_MODE: u32 = 0x0C34;
pub const VPCM_3DLUT_INDEX: u32 = 0x0C38;
pub const VPCM_3DLUT_DATA: u32 = 0x0C3C;
pub const VPCM_3DLUT_READ_WRITE_CONTROL: u32 = 0x0C40;

// VPMPC: blending
pub const VPMPCC_TOP_SEL: u32 = 0x1000;
pub const VPMPCC_BOT_SEL: u32 = 0x1004;
pub const VPMPCC_VPOPP_ID: u32 = 0x1008;
pub const VPMPCC_CONTROL: u32 = 0x100C;
pub const VPMPCC_BG_R_CR: u32 = 0x1010;
pub const VPMPCC_BG_G_Y: u32 = 0x1014;
pub const VPMPCC_BG_B_CB: u32 = 0x1018;
pub const VPMPC_OUT0_MUX: u32 = 0x101C;
pub const VPMPC_OUT0_DENORM_CONTROL: u32 = 0x1020;
pub const VPMPC_OUT0_DENORM_CLAMP_G_Y: u32 = 0x1024;
pub const VPMPC_OUT0_DENORM_CLAMP_B_CB: u32 = 0x1028;
pub const VPMPCC_OGAM_CONTROL: u32 = 0x102C;
pub const VPMPCC_MOVABLE_CM_LOCATION_CONTROL: u32 = 0x1030;

// VPOPP: output formatting
pub const VPFMT_CONTROL: u32 = 0x1400;
pub const VPFMT_BIT_DEPTH_CONTROL: u32 = 0x1404;
pub const VPFMT_DYNAMIC_EXP_CONTROL: u32 = 0x1408;
pub const VPFMT_CLAMP_COMPONENT_R: u32 = 0x140C;
pub const VPFMT_CLAMP_COMPONENT_G: u32 = 0x1410;
pub const VPFMT_CLAMP_COMPONENT_B: u32 = 0x1414;
pub const VPFMT_CLAMP_CNTL: u32 = 0x1418;
pub const VPOPP_PIPE_CONTROL: u32 = 0x141C;
pub const VPOPP_PIPE_OUTPUT_SIZE: u32 = 0x1420;

/// MPCC input selector meaning "nothing connected".
pub const MPCC_SEL_DISCONNECTED: u32 = 0xF;
