use bitflags::bitflags;

bitflags! {
    /// Flags of a message.
    ///
    /// Only the bits a client may set when creating or editing a message are
    /// named; unknown bits are retained as received.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct MessageFlags: u64 {
        /// Do not include any embeds when serializing this message.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Only visible to the user who invoked the interaction.
        const EPHEMERAL = 1 << 6;
        /// Will not trigger push and desktop notifications.
        const SUPPRESS_NOTIFICATIONS = 1 << 12;
        /// The message is a voice message.
        const IS_VOICE_MESSAGE = 1 << 13;
    }
}

impl MessageFlags {
    /// Build flags from a stored integer, keeping unknown bits.
    ///
    /// Negative integers carry no flags.
    pub fn from_integer(value: i64) -> Self {
        Self::from_bits_retain(u64::try_from(value).unwrap_or(0))
    }

    /// The flags as a stored integer.
    pub fn to_integer(self) -> i64 {
        i64::try_from(self.bits()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::MessageFlags;

    #[test]
    fn integer_round_trip_keeps_unknown_bits() {
        let flags = MessageFlags::from_integer(1 << 40 | 1 << 2);
        assert!(flags.contains(MessageFlags::SUPPRESS_EMBEDS));
        assert_eq!(flags.to_integer(), 1 << 40 | 1 << 2);
    }

    #[test]
    fn negative_integer_is_empty() {
        assert!(MessageFlags::from_integer(-3).is_empty());
    }
}
