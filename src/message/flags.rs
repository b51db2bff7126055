use bitflags::bitflags;

bitflags! {
    /// Flags associated with a `Msg` indicating its role or attributes.
    ///
    /// At most one of `SUBSCRIBE`, `CANCEL`, `EXCLUDE_SUBSCRIBE` and
    /// `UNEXCLUDE_SUBSCRIBE` may be set on a message. Any of them implies a
    /// ZMTP command frame on the wire, whether or not `COMMAND` is also set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MsgFlags: u8 {
        /// More message parts follow this one.
        const MORE = 0b0000_0001;
        /// Internal: Indicates a ZMTP command frame.
        const COMMAND = 0b0000_0010;
        /// Subscription request; the `SUBSCRIBE` command name is added by the encoder.
        const SUBSCRIBE = 0b0000_0100;
        /// Subscription cancellation; the `CANCEL` command name is added by the encoder.
        const CANCEL = 0b0000_1000;
        const EXCLUDE_SUBSCRIBE = 0b0001_0000;
        const UNEXCLUDE_SUBSCRIBE = 0b0010_0000;

        /// All mutually exclusive control classes.
        const CONTROL_CLASSES = Self::SUBSCRIBE.bits()
            | Self::CANCEL.bits()
            | Self::EXCLUDE_SUBSCRIBE.bits()
            | Self::UNEXCLUDE_SUBSCRIBE.bits();
    }
}
