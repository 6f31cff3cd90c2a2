/// Encodes bytes data.
pub trait Encoder {
    fn encode<Bytes>(&self, data: Bytes) -> String
    where
        Bytes: AsRef<[u8]>;
}

/// Encodes bytes data as a lower case hex `String`.
#[derive(Debug, Copy, Clone, Default)]
pub struct HexEncoder;

impl Encoder for HexEncoder {
    fn encode<Bytes>(&self, data: Bytes) -> String
    where
        Bytes: AsRef<[u8]>,
    {
        hex::encode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encoder() {
        assert_eq!(HexEncoder.encode([0x00, 0x0f, 0xab, 0xff]), "000fabff");
        assert_eq!(HexEncoder.encode(b""), "");
    }
}
