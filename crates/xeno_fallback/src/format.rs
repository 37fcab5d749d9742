//! BCn format identification

/// Block-compressed texture families with a software decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BcFormat {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
}

impl BcFormat {
    /// Match order; the first token found in a format name wins.
    pub const ALL: [BcFormat; 7] = [
        BcFormat::Bc1,
        BcFormat::Bc2,
        BcFormat::Bc3,
        BcFormat::Bc4,
        BcFormat::Bc5,
        BcFormat::Bc6h,
        BcFormat::Bc7,
    ];

    /// Classify a format name such as `BC7_UNORM_BLOCK` by substring.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| name.contains(f.token()))
    }

    pub fn token(self) -> &'static str {
        match self {
            BcFormat::Bc1 => "BC1",
            BcFormat::Bc2 => "BC2",
            BcFormat::Bc3 => "BC3",
            BcFormat::Bc4 => "BC4",
            BcFormat::Bc5 => "BC5",
            BcFormat::Bc6h => "BC6",
            BcFormat::Bc7 => "BC7",
        }
    }

    /// File name of the decoder program.
    pub fn decoder_file(self) -> &'static str {
        match self {
            BcFormat::Bc1 => "bc1.spv",
            BcFormat::Bc2 => "bc2.spv",
            BcFormat::Bc3 => "bc3.spv",
            BcFormat::Bc4 => "bc4.spv",
            BcFormat::Bc5 => "bc5.spv",
            BcFormat::Bc6h => "bc6h.spv",
            BcFormat::Bc7 => "bc7.spv",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_families() {
        assert_eq!(BcFormat::from_name("BC1_RGBA_UNORM_BLOCK"), Some(BcFormat::Bc1));
        assert_eq!(BcFormat::from_name("BC6H_UFLOAT_BLOCK"), Some(BcFormat::Bc6h));
        assert_eq!(BcFormat::from_name("BC7_UNORM_BLOCK").map(BcFormat::decoder_file), Some("bc7.spv"));
        assert_eq!(BcFormat::from_name("R8G8B8A8_UNORM"), None);
        assert_eq!(BcFormat::from_name(""), None);
    }

    #[test]
    fn earlier_token_wins() {
        // Contains both BC3 and BC1; BC1 is checked first
        assert_eq!(BcFormat::from_name("BC3_BC1"), Some(BcFormat::Bc1));
    }
}
