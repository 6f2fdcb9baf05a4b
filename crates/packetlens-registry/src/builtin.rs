//! Builtin declaration tables.
//!
//! Ids follow the latest supported protocol snapshot. Entries marked
//! `deprecated` were renamed, merged or removed upstream; they are kept so
//! that old logical names still resolve. Deprecated entries that no longer
//! have a real id use placeholder ids counting down from `0xFF`.
//!
//! `client` groups hold packets sent by the client ([`Direction::Inbound`]),
//! `server` groups hold packets sent by the server ([`Direction::Outbound`]).
//!
//! [`Direction::Inbound`]: packetlens_protocol::Direction::Inbound
//! [`Direction::Outbound`]: packetlens_protocol::Direction::Outbound

use crate::DeclarationTable;

/// Handshake phase: the client announces the protocol version and the next phase.
pub mod handshake {
    crate::packet_group! {
        pub mod client: Handshake, Inbound {
            SET_PROTOCOL(0x00, "SetProtocol", "C00Handshake") [force_async];
        }
    }

    crate::packet_group! {
        pub mod server: Handshake, Outbound {}
    }
}

/// Status phase: server list ping.
pub mod status {
    crate::packet_group! {
        pub mod client: Status, Inbound {
            START(0x00, "Start", "CPacketServerQuery");
            PING(0x01, "Ping", "CPacketPing") [force_async];
        }
    }

    crate::packet_group! {
        pub mod server: Status, Outbound {
            SERVER_INFO(0x00, "ServerInfo", "SPacketServerInfo") [force_async];
            PONG(0x01, "Pong", "SPacketPong") [force_async];
            OUT_SERVER_INFO(= SERVER_INFO) [deprecated, force_async];
        }
    }
}

/// Login phase: authentication, encryption and compression setup.
pub mod login {
    crate::packet_group! {
        pub mod client: Login, Inbound {
            START(0x00, "Start", "CPacketLoginStart");
            ENCRYPTION_BEGIN(0x01, "EncryptionBegin", "CPacketEncryptionResponse");
            CUSTOM_PAYLOAD(0x02, "CustomPayload", "CPacketCustomPayload");
            LOGIN_ACK(0x03, "LoginAcknowledged");
        }
    }

    crate::packet_group! {
        pub mod server: Login, Outbound {
            DISCONNECT(0x00, "Disconnect", "SPacketDisconnect") [force_async];
            ENCRYPTION_BEGIN(0x01, "EncryptionBegin", "SPacketEncryptionRequest");
            SUCCESS(0x02, "Success", "SPacketLoginSuccess");
            SET_COMPRESSION(0x03, "SetCompression", "SPacketEnableCompression");
            CUSTOM_PAYLOAD(0x04, "CustomPayload", "SPacketCustomPayload");
        }
    }
}

/// Configuration phase: registries, resource packs and feature flags before play.
pub mod configuration {
    crate::packet_group! {
        pub mod client: Configuration, Inbound {
            CLIENT_INFORMATION(0x00, "ClientInformation");
            CUSTOM_PAYLOAD(0x01, "CustomPayload");
            FINISH_CONFIGURATION(0x02, "FinishConfiguration");
            KEEP_ALIVE(0x03, "KeepAlive");
            PONG(0x04, "Pong");
            RESOURCE_PACK_ACK(0x05, "ResourcePack");
        }
    }

    crate::packet_group! {
        pub mod server: Configuration, Outbound {
            CUSTOM_PAYLOAD(0x00, "CustomPayload");
            DISCONNECT(0x01, "Disconnect");
            FINISH_CONFIGURATION(0x02, "FinishConfiguration");
            KEEP_ALIVE(0x03, "KeepAlive");
            PING(0x04, "Ping");
            REGISTRY_DATA(0x05, "RegistryData");
            REMOVE_RESOURCE_PACK(0x06, "ResourcePackPopPacket");
            ADD_RESOURCE_PACK(0x07, "ResourcePackPushPacket");
            UPDATE_ENABLED_FEATURES(0x08, "UpdateEnabledFeatures");
            UPDATE_TAGS(0x09, "UpdateTags");
            RESOURCE_PACK(0xFF, "ResourcePack") [deprecated];
        }
    }
}

/// Play phase: everything that happens in the world.
pub mod play {
    crate::packet_group! {
        pub mod client: Play, Inbound {
            TELEPORT_ACCEPT(0x00, "TeleportAccept", "CPacketConfirmTeleport");
            TILE_NBT_QUERY(0x01, "TileNBTQuery");
            DIFFICULTY_CHANGE(0x02, "DifficultyChange");
            CHAT_ACK(0x03, "ChatAck");
            CHAT_COMMAND(0x04, "ChatCommand");
            CHAT(0x05, "Chat", "CPacketChatMessage");
            CHAT_SESSION_UPDATE(0x06, "ChatSessionUpdate");
            CHUNK_BATCH_RECEIVED(0x07, "ChunkBatchReceived");
            CLIENT_COMMAND(0x08, "ClientCommand", "CPacketClientStatus");
            SETTINGS(0x09, "Settings", "CPacketClientSettings");
            TAB_COMPLETE(0x0A, "TabComplete", "CPacketTabComplete");
            CONFIGURATION_ACK(0x0B, "ConfigurationAcknowledged");
            ENCHANT_ITEM(0x0C, "EnchantItem", "CPacketEnchantItem");
            WINDOW_CLICK(0x0D, "WindowClick", "CPacketClickWindow");
            CLOSE_WINDOW(0x0E, "CloseWindow", "CPacketCloseWindow");
            CONTAINER_SLOT_STATE_CHANGED(0x0F, "ContainerSlotStateChangedPacket");
            CUSTOM_PAYLOAD(0x10, "CustomPayload", "CPacketCustomPayload");
            B_EDIT(0x11, "BEdit");
            ENTITY_NBT_QUERY(0x12, "EntityNBTQuery");
            USE_ENTITY(0x13, "UseEntity", "CPacketUseEntity");
            JIGSAW_GENERATE(0x14, "JigsawGenerate");
            KEEP_ALIVE(0x15, "KeepAlive", "CPacketKeepAlive");
            DIFFICULTY_LOCK(0x16, "DifficultyLock");
            POSITION(0x17, "Flying$Position", "Flying$PacketPlayInPosition", "CPacketPlayer$Position");
            POSITION_LOOK(0x18, "Flying$PositionLook", "Flying$PacketPlayInPositionLook", "CPacketPlayer$PositionRotation");
            LOOK(0x19, "Flying$Look", "Flying$PacketPlayInLook", "CPacketPlayer$Rotation");
            GROUND(0x1A, "Flying$d");
            VEHICLE_MOVE(0x1B, "VehicleMove", "CPacketVehicleMove");
            BOAT_MOVE(0x1C, "BoatMove", "CPacketSteerBoat");
            PICK_ITEM(0x1D, "PickItem");
            PING_REQUEST(0x1E, "PingRequest");
            AUTO_RECIPE(0x1F, "AutoRecipe", "CPacketPlaceRecipe");
            ABILITIES(0x20, "Abilities", "CPacketPlayerAbilities");
            BLOCK_DIG(0x21, "BlockDig", "CPacketPlayerDigging");
            ENTITY_ACTION(0x22, "EntityAction", "CPacketEntityAction");
            STEER_VEHICLE(0x23, "SteerVehicle", "CPacketInput");
            PONG(0x24, "Pong");
            RECIPE_SETTINGS(0x25, "RecipeSettings");
            RECIPE_DISPLAYED(0x26, "RecipeDisplayed", "CPacketRecipeInfo");
            ITEM_NAME(0x27, "ItemName");
            RESOURCE_PACK_STATUS(0x28, "ResourcePackStatus", "CPacketResourcePackStatus");
            ADVANCEMENTS(0x29, "Advancements", "CPacketSeenAdvancements");
            TR_SEL(0x2A, "TrSel");
            BEACON(0x2B, "Beacon");
            HELD_ITEM_SLOT(0x2C, "HeldItemSlot", "CPacketHeldItemChange");
            SET_COMMAND_BLOCK(0x2D, "SetCommandBlock");
            SET_COMMAND_MINECART(0x2E, "SetCommandMinecart");
            SET_CREATIVE_SLOT(0x2F, "SetCreativeSlot", "CPacketCreativeInventoryAction");
            SET_JIGSAW(0x30, "SetJigsaw");
            STRUCT(0x31, "Struct");
            UPDATE_SIGN(0x32, "UpdateSign", "CPacketUpdateSign");
            ARM_ANIMATION(0x33, "ArmAnimation", "CPacketAnimation");
            SPECTATE(0x34, "Spectate", "CPacketSpectate");
            USE_ITEM(0x35, "UseItem", "CPacketPlayerTryUseItemOnBlock");
            BLOCK_PLACE(0x36, "BlockPlace", "CPacketPlayerTryUseItem");

            // Renamed or removed upstream.
            TRANSACTION(0xFF, "Transaction", "CPacketConfirmTransaction") [deprecated];
            FLYING(0xFE, "Flying", "CPacketPlayer") [deprecated];
            CHAT_PREVIEW(0xFD, "ChatPreview") [deprecated];
        }
    }

    crate::packet_group! {
        pub mod server: Play, Outbound {
            BUNDLE(0x00, "Delimiter", "BundleDelimiterPacket");
            SPAWN_ENTITY(0x01, "SpawnEntity", "SPacketSpawnObject");
            SPAWN_ENTITY_EXPERIENCE_ORB(0x02, "SpawnEntityExperienceOrb", "SPacketSpawnExperienceOrb");
            ANIMATION(0x03, "Animation", "SPacketAnimation");
            STATISTIC(0x04, "Statistic", "SPacketStatistics");
            BLOCK_CHANGED_ACK(0x05, "BlockChangedAck");
            BLOCK_BREAK_ANIMATION(0x06, "BlockBreakAnimation", "SPacketBlockBreakAnim");
            TILE_ENTITY_DATA(0x07, "TileEntityData", "SPacketUpdateTileEntity");
            BLOCK_ACTION(0x08, "BlockAction", "SPacketBlockAction");
            BLOCK_CHANGE(0x09, "BlockChange", "SPacketBlockChange");
            BOSS(0x0A, "Boss", "SPacketUpdateBossInfo");
            SERVER_DIFFICULTY(0x0B, "ServerDifficulty", "SPacketServerDifficulty");
            CHUNK_BATCH_FINISHED(0x0C, "ChunkBatchFinished");
            CHUNK_BATCH_START(0x0D, "ChunkBatchStart");
            CHUNKS_BIOMES(0x0E, "ChunksBiomes", "ClientboundChunksBiomesPacket");
            CLEAR_TITLES(0x0F, "ClearTitles");
            TAB_COMPLETE(0x10, "TabComplete", "SPacketTabComplete");
            COMMANDS(0x11, "Commands");
            CLOSE_WINDOW(0x12, "CloseWindow", "SPacketCloseWindow");
            WINDOW_ITEMS(0x13, "WindowItems", "SPacketWindowItems");
            WINDOW_DATA(0x14, "WindowData", "SPacketWindowProperty");
            SET_SLOT(0x15, "SetSlot", "SPacketSetSlot");
            SET_COOLDOWN(0x16, "SetCooldown", "SPacketCooldown");
            CUSTOM_CHAT_COMPLETIONS(0x17, "CustomChatCompletions");
            CUSTOM_PAYLOAD(0x18, "CustomPayload", "SPacketCustomPayload");
            DAMAGE_EVENT(0x19, "DamageEvent", "ClientboundDamageEventPacket");
            DELETE_CHAT_MESSAGE(0x1A, "DeleteChat");
            KICK_DISCONNECT(0x1B, "KickDisconnect", "SPacketDisconnect");
            DISGUISED_CHAT(0x1C, "DisguisedChat");
            ENTITY_STATUS(0x1D, "EntityStatus", "SPacketEntityStatus");
            EXPLOSION(0x1E, "Explosion", "SPacketExplosion");
            UNLOAD_CHUNK(0x1F, "UnloadChunk", "SPacketUnloadChunk");
            GAME_STATE_CHANGE(0x20, "GameStateChange", "SPacketChangeGameState");
            OPEN_WINDOW_HORSE(0x21, "OpenWindowHorse");
            HURT_ANIMATION(0x22, "HurtAnimation", "ClientboundHurtAnimationPacket");
            INITIALIZE_BORDER(0x23, "InitializeBorder");
            KEEP_ALIVE(0x24, "KeepAlive", "SPacketKeepAlive");
            MAP_CHUNK(0x25, "LevelChunkWithLight", "MapChunk", "SPacketChunkData");
            WORLD_EVENT(0x26, "WorldEvent", "SPacketEffect");
            WORLD_PARTICLES(0x27, "WorldParticles", "SPacketParticles");
            LIGHT_UPDATE(0x28, "LightUpdate");
            LOGIN(0x29, "Login", "SPacketJoinGame");
            MAP(0x2A, "Map", "SPacketMaps");
            OPEN_WINDOW_MERCHANT(0x2B, "OpenWindowMerchant");
            REL_ENTITY_MOVE(0x2C, "Entity$RelEntityMove", "Entity$PacketPlayOutRelEntityMove");
            REL_ENTITY_MOVE_LOOK(0x2D, "Entity$RelEntityMoveLook", "Entity$PacketPlayOutRelEntityMoveLook");
            ENTITY_LOOK(0x2E, "Entity$EntityLook", "Entity$PacketPlayOutEntityLook");
            VEHICLE_MOVE(0x2F, "VehicleMove", "SPacketMoveVehicle");
            OPEN_BOOK(0x30, "OpenBook");
            OPEN_WINDOW(0x31, "OpenWindow", "SPacketOpenWindow");
            OPEN_SIGN_EDITOR(0x32, "OpenSignEditor", "SPacketSignEditorOpen");
            PING(0x33, "Ping");
            PONG_RESPONSE(0x34, "PongResponse");
            AUTO_RECIPE(0x35, "AutoRecipe", "SPacketPlaceGhostRecipe");
            ABILITIES(0x36, "Abilities", "SPacketPlayerAbilities");
            CHAT(0x37, "PlayerChat", "Chat", "SPacketChat");
            PLAYER_COMBAT_END(0x38, "PlayerCombatEnd");
            PLAYER_COMBAT_ENTER(0x39, "PlayerCombatEnter");
            PLAYER_COMBAT_KILL(0x3A, "PlayerCombatKill");
            PLAYER_INFO_REMOVE(0x3B, "PlayerInfoRemove");
            PLAYER_INFO(0x3C, "PlayerInfoUpdate", "PlayerInfo");
            LOOK_AT(0x3D, "LookAt", "SPacketPlayerPosLook");
            POSITION(0x3E, "Position");
            RECIPES(0x3F, "Recipes", "SPacketRecipeBook");
            ENTITY_DESTROY(0x40, "EntityDestroy", "SPacketDestroyEntities");
            REMOVE_ENTITY_EFFECT(0x41, "RemoveEntityEffect", "SPacketRemoveEntityEffect");
            RESET_SCORE(0x42, "ResetScorePacket");
            REMOVE_RESOURCE_PACK(0x43, "ResourcePackPopPacket");
            ADD_RESOURCE_PACK(0x44, "ResourcePackPushPacket");
            RESPAWN(0x45, "Respawn", "SPacketRespawn");
            ENTITY_HEAD_ROTATION(0x46, "EntityHeadRotation", "SPacketEntityHeadLook");
            MULTI_BLOCK_CHANGE(0x47, "MultiBlockChange", "SPacketMultiBlockChange");
            SELECT_ADVANCEMENT_TAB(0x48, "SelectAdvancementTab", "SPacketSelectAdvancementsTab");
            SERVER_DATA(0x49, "ServerData");
            SET_ACTION_BAR_TEXT(0x4A, "SetActionBarText");
            SET_BORDER_CENTER(0x4B, "SetBorderCenter");
            SET_BORDER_LERP_SIZE(0x4C, "SetBorderLerpSize");
            SET_BORDER_SIZE(0x4D, "SetBorderSize");
            SET_BORDER_WARNING_DELAY(0x4E, "SetBorderWarningDelay");
            SET_BORDER_WARNING_DISTANCE(0x4F, "SetBorderWarningDistance");
            CAMERA(0x50, "Camera", "SPacketCamera");
            HELD_ITEM_SLOT(0x51, "HeldItemSlot", "SPacketHeldItemChange");
            VIEW_CENTRE(0x52, "ViewCentre");
            VIEW_DISTANCE(0x53, "ViewDistance");
            SPAWN_POSITION(0x54, "SpawnPosition", "SPacketSpawnPosition");
            SCOREBOARD_DISPLAY_OBJECTIVE(0x55, "ScoreboardDisplayObjective", "SPacketDisplayObjective");
            ENTITY_METADATA(0x56, "EntityMetadata", "SPacketEntityMetadata");
            ATTACH_ENTITY(0x57, "AttachEntity", "SPacketEntityAttach");
            ENTITY_VELOCITY(0x58, "EntityVelocity", "SPacketEntityVelocity");
            ENTITY_EQUIPMENT(0x59, "EntityEquipment", "SPacketEntityEquipment");
            EXPERIENCE(0x5A, "Experience", "SPacketSetExperience");
            UPDATE_HEALTH(0x5B, "UpdateHealth", "SPacketUpdateHealth");
            SCOREBOARD_OBJECTIVE(0x5C, "ScoreboardObjective", "SPacketScoreboardObjective");
            MOUNT(0x5D, "Mount", "SPacketSetPassengers");
            SCOREBOARD_TEAM(0x5E, "ScoreboardTeam", "SPacketTeams");
            SCOREBOARD_SCORE(0x5F, "ScoreboardScore", "SPacketUpdateScore");
            UPDATE_SIMULATION_DISTANCE(0x60, "SetSimulationDistance");
            SET_SUBTITLE_TEXT(0x61, "SetSubtitleText");
            UPDATE_TIME(0x62, "UpdateTime", "SPacketTimeUpdate");
            SET_TITLE_TEXT(0x63, "SetTitleText");
            SET_TITLES_ANIMATION(0x64, "SetTitlesAnimation");
            ENTITY_SOUND(0x65, "EntitySound", "SPacketSoundEffect");
            NAMED_SOUND_EFFECT(0x66, "NamedSoundEffect");
            START_CONFIGURATION(0x67, "StartConfiguration");
            STOP_SOUND(0x68, "StopSound");
            SYSTEM_CHAT(0x69, "SystemChat");
            PLAYER_LIST_HEADER_FOOTER(0x6A, "PlayerListHeaderFooter", "SPacketPlayerListHeaderFooter");
            NBT_QUERY(0x6B, "NBTQuery");
            COLLECT(0x6C, "Collect", "SPacketCollectItem");
            ENTITY_TELEPORT(0x6D, "EntityTeleport", "SPacketEntityTeleport");
            TICKING_STATE(0x6E, "TickingStatePacket");
            TICKING_STEP_STATE(0x6F, "TickingStepPacket");
            ADVANCEMENTS(0x70, "Advancements", "SPacketAdvancementInfo");
            UPDATE_ATTRIBUTES(0x71, "UpdateAttributes", "SPacketEntityProperties");
            ENTITY_EFFECT(0x72, "EntityEffect", "SPacketEntityEffect");
            RECIPE_UPDATE(0x73, "RecipeUpdate");
            TAGS(0x74, "Tags");

            // Renamed or removed upstream.
            MAP_CHUNK_BULK(0xFF, "MapChunkBulk") [deprecated];
            SET_COMPRESSION(0xFE, "SetCompression") [deprecated];
            UPDATE_ENTITY_NBT(0xFD, "UpdateEntityNBT") [deprecated];
            CRAFT_PROGRESS_BAR(= WINDOW_DATA) [deprecated];
            ENTITY_MOVE_LOOK(= REL_ENTITY_MOVE_LOOK) [deprecated];
            STATISTICS(= STATISTIC) [deprecated];
            OPEN_SIGN_ENTITY(= OPEN_SIGN_EDITOR) [deprecated];
            UPDATE_SIGN(0xFC, "UpdateSign") [deprecated];
            BED(0xFB, "Bed", "SPacketUseBed") [deprecated];
            USE_BED(= BED) [deprecated];
            SPAWN_ENTITY_WEATHER(0xFA, "SpawnEntityWeather", "SPacketSpawnGlobalEntity") [deprecated];
            TITLE(0xF9, "Title") [deprecated];
            WORLD_BORDER(0xF8, "WorldBorder") [deprecated];
            COMBAT_EVENT(0xF7, "CombatEvent") [deprecated];
            TRANSACTION(0xF6, "Transaction", "SPacketConfirmTransaction") [deprecated];
            ENTITY(0xF5, "Entity", "SPacketEntity") [deprecated];
            SPAWN_ENTITY_LIVING(0xF4, "SpawnEntityLiving", "SPacketSpawnMob") [deprecated];
            SPAWN_ENTITY_PAINTING(0xF3, "SpawnEntityPainting", "SPacketSpawnPainting") [deprecated];
            ADD_VIBRATION_SIGNAL(0xF2, "AddVibrationSignal") [deprecated];
            BLOCK_BREAK(0xF1, "BlockBreak") [deprecated];
            CHAT_PREVIEW(0xF0, "ChatPreview") [deprecated];
            PLAYER_CHAT_HEADER(0xEF, "PlayerChatHeader") [deprecated];
            SET_DISPLAY_CHAT_PREVIEW(0xEE, "SetDisplayChatPreview") [deprecated];
            CUSTOM_SOUND_EFFECT(0xED, "CustomSoundEffect", "SPacketCustomSound") [deprecated];
            UPDATE_ENABLED_FEATURES(0xEC, "UpdateEnabledFeatures") [deprecated];
            NAMED_ENTITY_SPAWN(0xEB, "NamedEntitySpawn", "SPacketSpawnPlayer") [deprecated];
            RESOURCE_PACK_SEND(0xEA, "ResourcePackSend", "SPacketResourcePackSend") [deprecated];
        }
    }
}

/// Every builtin table, in registration order.
pub const BUILTIN_TABLES: [&DeclarationTable; 10] = [
    &handshake::client::TABLE,
    &handshake::server::TABLE,
    &status::client::TABLE,
    &status::server::TABLE,
    &login::client::TABLE,
    &login::server::TABLE,
    &configuration::client::TABLE,
    &configuration::server::TABLE,
    &play::client::TABLE,
    &play::server::TABLE,
];
