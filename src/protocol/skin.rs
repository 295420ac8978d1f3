//! Player skin descriptor. Only the write direction exists.

use crate::protocol::binary::BinaryData;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkinImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels. Not checked against `width * height`.
    pub data: Vec<u8>,
}

impl SkinImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkinAnimation {
    pub image: SkinImage,
    pub animation_type: u32,
    pub frames: f32,
    pub expression: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cape {
    pub id: String,
    pub image: SkinImage,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonaPiece {
    pub piece_id: String,
    pub piece_type: String,
    pub pack_id: String,
    pub is_default: bool,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonaPieceTint {
    pub piece_type: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    pub id: String,
    pub play_fab_id: String,
    pub resource_patch: Vec<u8>,
    pub image: SkinImage,
    pub animations: Vec<SkinAnimation>,
    pub cape: Cape,
    pub geometry: Vec<u8>,
    pub animation_data: Vec<u8>,
    pub premium: bool,
    pub persona: bool,
    pub persona_cape_on_classic: bool,
    pub arm_size: String,
    pub color: String,
    pub persona_pieces: Vec<PersonaPiece>,
    pub piece_tints: Vec<PersonaPieceTint>,
}

impl BinaryData {
    pub fn write_skin_image(&mut self, image: &SkinImage) {
        self.write_u32_le(image.width);
        self.write_u32_le(image.height);
        self.write_byte_array(&image.data);
    }

    pub fn write_skin(&mut self, skin: &Skin) {
        self.write_string(&skin.id);
        self.write_string(&skin.play_fab_id);
        self.write_byte_array(&skin.resource_patch);
        self.write_skin_image(&skin.image);

        self.write_u32_le(skin.animations.len() as u32);
        for animation in &skin.animations {
            self.write_skin_image(&animation.image);
            self.write_u32_le(animation.animation_type);
            self.write_f32_le(animation.frames);
            self.write_u32_le(animation.expression);
        }

        self.write_skin_image(&skin.cape.image);
        self.write_byte_array(&skin.geometry);
        self.write_byte_array(&skin.animation_data);
        self.write_bool(skin.premium);
        self.write_bool(skin.persona);
        self.write_bool(skin.persona_cape_on_classic);
        self.write_string(&skin.cape.id);

        // Full skin id, always freshly generated
        self.write_string(&Uuid::new_v4().to_string());

        self.write_string(&skin.arm_size);
        self.write_string(&skin.color);

        self.write_u32_le(skin.persona_pieces.len() as u32);
        for piece in &skin.persona_pieces {
            self.write_string(&piece.piece_id);
            self.write_string(&piece.piece_type);
            self.write_string(&piece.pack_id);
            self.write_bool(piece.is_default);
            self.write_string(&piece.product_id);
        }

        self.write_u32_le(skin.piece_tints.len() as u32);
        for tint in &skin.piece_tints {
            self.write_string(&tint.piece_type);
            self.write_u32_le(tint.colors.len() as u32);
            for color in &tint.colors {
                self.write_string(color);
            }
        }
    }
}
