//! The `packet_group!` declaration macro.

/// Declares the packet types of one (phase, direction) group.
///
/// Expands to a module holding one `PacketKey` constant per entry plus the
/// group's [`DeclarationTable`](crate::DeclarationTable) as `TABLE`.
///
/// ```
/// packetlens_registry::packet_group! {
///     /// Play phase, sent by the server.
///     pub mod play_server: Play, Outbound {
///         SET_SLOT(0x15, "SetSlot", "SPacketSetSlot");
///         WINDOW_DATA(0x14, "WindowData");
///         CRAFT_PROGRESS_BAR(= WINDOW_DATA) [deprecated];
///         SERVER_INFO(0x30, "ServerInfo") [force_async];
///     }
/// }
///
/// assert_eq!(play_server::SET_SLOT.id.0, 0x15);
/// assert_eq!(play_server::CRAFT_PROGRESS_BAR, play_server::WINDOW_DATA);
/// assert_eq!(play_server::TABLE.len(), 4);
/// ```
///
/// An entry is either `NAME(id, "Token", ...)` or `NAME(= OTHER)` for an
/// alias of an earlier entry. Optional flags in brackets map to the
/// [`Declaration`](crate::Declaration) builder methods.
#[macro_export]
macro_rules! packet_group {
    (
        $(#[$meta:meta])*
        $vis:vis mod $group:ident : $phase:ident, $direction:ident {
            $(
                $(#[$entry_meta:meta])*
                $name:ident ( $($spec:tt)* ) $([ $($flag:ident),* $(,)? ])? ;
            )*
        }
    ) => {
        $(#[$meta])*
        $vis mod $group {
            $(
                $(#[$entry_meta])*
                pub const $name: $crate::__private::PacketKey =
                    $crate::packet_group!(@key $phase, $direction, $($spec)*);
            )*

            /// Every declaration of this group, in order.
            pub const TABLE: $crate::DeclarationTable = $crate::DeclarationTable::new(
                concat!(stringify!($phase), " ", stringify!($direction)),
                $crate::__private::ProtocolPhase::$phase,
                $crate::__private::Direction::$direction,
                &[
                    $(
                        $crate::packet_group!(@decl $name, $($spec)*)
                            $($( .$flag() )*)?
                    ),*
                ],
            );
        }
    };

    (@key $phase:ident, $direction:ident, = $target:ident) => {
        $target
    };
    (@key $phase:ident, $direction:ident, $id:expr $(, $token:literal)* $(,)?) => {
        $crate::__private::PacketKey::new(
            $crate::__private::ProtocolPhase::$phase,
            $crate::__private::Direction::$direction,
            $crate::__private::PacketId($id),
        )
    };

    (@decl $name:ident, = $target:ident) => {
        $crate::Declaration::alias(stringify!($name), $target.id, stringify!($target))
    };
    (@decl $name:ident, $id:expr $(, $token:literal)* $(,)?) => {
        $crate::Declaration::new(
            stringify!($name),
            $crate::__private::PacketId($id),
            &[$($token),*],
        )
    };
}
