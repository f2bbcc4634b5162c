//! Opcode constants used by the wallet's locking, unlocking and data scripts.

pub const OP_0: u8 = 0x00;
pub const OP_FALSE: u8 = 0x00;
pub const OP_DATA_1: u8 = 0x01;
pub const OP_DATA_20: u8 = 0x14;
pub const OP_DATA_33: u8 = 0x21;
pub const OP_DATA_75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_NOP: u8 = 0x61;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;

/// Canonical name for an opcode, or `"OP_UNKNOWN"`.
pub fn opcode_to_string(op: u8) -> &'static str {
    match op {
        OP_0 => "OP_0",
        OP_DATA_1..=OP_DATA_75 => "OP_DATA",
        OP_PUSHDATA1 => "OP_PUSHDATA1",
        OP_PUSHDATA2 => "OP_PUSHDATA2",
        OP_PUSHDATA4 => "OP_PUSHDATA4",
        OP_1NEGATE => "OP_1NEGATE",
        OP_1..=OP_16 => "OP_N",
        OP_NOP => "OP_NOP",
        OP_RETURN => "OP_RETURN",
        OP_DUP => "OP_DUP",
        OP_EQUAL => "OP_EQUAL",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_HASH160 => "OP_HASH160",
        OP_CHECKSIG => "OP_CHECKSIG",
        _ => "OP_UNKNOWN",
    }
}

/// Whether `op` pushes data onto the stack (OP_DATA_1 through OP_PUSHDATA4).
pub fn is_push_data(op: u8) -> bool {
    (OP_DATA_1..=OP_PUSHDATA4).contains(&op)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(opcode_to_string(OP_RETURN), "OP_RETURN");
        assert_eq!(opcode_to_string(OP_CHECKSIG), "OP_CHECKSIG");
        assert_eq!(opcode_to_string(0x20), "OP_DATA");
        assert_eq!(opcode_to_string(0xff), "OP_UNKNOWN");
    }

    #[test]
    fn test_push_data_range() {
        assert!(!is_push_data(OP_0));
        assert!(is_push_data(OP_DATA_20));
        assert!(is_push_data(OP_PUSHDATA4));
        assert!(!is_push_data(OP_1NEGATE));
    }
}
