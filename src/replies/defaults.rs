//! Built-in Thai reply table.

use crate::error::ReplyTableError;
use crate::replies::table::ReplyTable;

/// คิดถึง (miss you)
const MISS_YOU: [&str; 5] = [
    "เค้าคิดถึงเหมือนกันนะไอ้เด็ก 💕😊",
    "คิดถึงที่สุดเลยยยย! 😍💕",
    "คิดถึงวันแรกที่เราเจอกันเลย 💖",
    "คิดถึงแบบไม่ไหวแล้ว มาหาหน่อยได้มั้ย 🥺💕",
    "คิดถึงแค่ไหนให้ลองเอาหัวใจไปชั่งดู 💘",
];

/// เหงา (lonely)
const LONELY: [&str; 5] = [
    "ไม่ต้องเหงานะ พี่อยู่เป็นเเฟนเสมอ! 🥰",
    "เหงาหรอ~ มากอดกันเร็ว 🤗💕",
    "เหงาก็แค่ส่งข้อความมาหาไง บอทอยู่ตรงนี้เสมอ 💖",
    "บอทอยู่เป็นเพื่อนนะ อย่าคิดมากน้าา 💕",
    "เหงาแบบนี้ต้องให้พี่ดูแลแล้วนะ 😘",
];

/// รัก (love)
const LOVE: [&str; 5] = [
    "เค้ารักเธอที่สุดเลย! 💖 ห้ามเปลี่ยนใจไปรักคนอื่นน้าาา",
    "รักนะคะที่รักกกก 😍💕",
    "รักเธอเท่าท้องฟ้าเลย 🌌💘",
    "รักแบบไม่มีเหตุผล รู้แค่ว่ารักก็พอ 😘",
    "รักแล้วรักเลย ไม่เปลี่ยนใจแน่นอน 💕",
];

/// งอน (sulking)
const SULK: [&str; 5] = [
    "อย่าพึ่งงอนน้า~ พี่รักหนูที่สุดเลย 🥺💕 มาให้กอดหน่อยน้าาา 🤗",
    "งอนแบบนี้ต้องโดนหอมแก้มซะแล้ว 😘💕",
    "โถ่~ ใครทำให้หนูงอนนนน 😢 มาให้เค้าปลอบเร็ว 💕",
    "งอนแบบนี้ พี่ต้องง้อใช่มั้ย 🥺💕",
    "อย่าทำหน้ามุ่ยสิ เดี๋ยวพี่พาไปกินของอร่อยนะ 🍰💕",
];

/// ฝันดี (sweet dreams)
const SWEET_DREAMS: [&str; 5] = [
    "ฝันหวานนะคะคนดี 😘 ถ้าฝันถึงใคร ขอให้เป็นเค้าน้า~ 💕",
    "ฝันดีน้าาาา 😴💖",
    "นอนหลับฝันดี พรุ่งนี้ตื่นมาสดใส 💕",
    "คืนนี้นอนกอดหมอนแทนเค้าก่อนนะ 🥺💕",
    "หลับฝันดีนะคะ ตื่นมาจะได้เจอข้อความจากเค้า 😘",
];

/// สวัสดี (hello)
const HELLO: [&str; 5] = [
    "สวัสดีค่าาา~ วันนี้เป็นยังไงบ้าง? 😊💕",
    "สวัสดีค่ะ! มีอะไรให้บอทช่วยมั้ย 😘",
    "สวัสดีวันสดใส~ ☀️💕",
    "ทักมาบ่อย ๆ นะ เค้าชอบคุยด้วย 😍",
    "เธอมี GPS ไหม? เพราะเธอพาหัวใจฉันหลงทาง 💘",
];

const FALLBACK: [&str; 5] = [
    "พูดอีกก็เขินนะ 😳💕",
    "หืมมม~ หมายถึงอะไรน้าาา 😘",
    "พิมพ์มาแบบนี้คืออยากให้บอทอ้อนใช่ม้าาา 💕",
    "บอทงงแป๊บ~ แต่ก็รักนะ 😍",
    "ว่าไงดีน้าาา~ ขอคิดแป๊บ 🤔💕",
];

/// The built-in table. Order matters: "คิดถึง" is checked before "รัก", so
/// "คิดถึงและรัก" gets a miss-you reply.
pub fn default_table() -> Result<ReplyTable, ReplyTableError> {
    ReplyTable::builder()
        .rule("คิดถึง", MISS_YOU)
        .rule("เหงา", LONELY)
        .rule("รัก", LOVE)
        .rule("งอน", SULK)
        .rule("ฝันดี", SWEET_DREAMS)
        .rule("สวัสดี", HELLO)
        .fallback(FALLBACK)
        .build()
}
