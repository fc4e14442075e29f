// src/common/cursor.rs

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const MAX_CURSOR_LEN: usize = 512;

/// Cursor pagination: nilai sort key terakhir + id sebagai tie-breaker,
/// di-encode sebagai base64url dari JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub sort_value: String,
    pub id: Uuid,
}

pub fn encode_cursor(cursor: &Cursor) -> String {
    // Serialisasi struct dengan field tetap tidak bisa gagal.
    let bytes = serde_json::to_vec(cursor).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Toleran terhadap input rusak: None, tidak pernah panic. Cursor yang
/// tidak bisa dibaca diperlakukan seperti tidak ada cursor.
pub fn decode_cursor(raw: &str) -> Option<Cursor> {
    if raw.is_empty() || raw.len() > MAX_CURSOR_LEN {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Cursor halaman berikut dari hasil listing: diambil dari baris terakhir
/// bila halaman penuh (berarti kemungkinan masih ada data). Baris tanpa
/// field yang diharapkan menghasilkan None, bukan error.
pub fn next_cursor_from_rows(rows: &serde_json::Value, limit: i64) -> Option<String> {
    let arr = rows.as_array()?;
    if (arr.len() as i64) < limit {
        return None;
    }
    let last = arr.last()?;
    let id = last.get("id")?.as_str()?.parse().ok()?;
    let sort_value = last.get("created_at")?.as_str()?.to_string();
    Some(encode_cursor(&Cursor { sort_value, id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bolak_balik_cursor() {
        let cursor = Cursor {
            sort_value: "2025-11-03T08:15:00Z".into(),
            id: Uuid::new_v4(),
        };
        let encoded = encode_cursor(&cursor);
        let decoded = decode_cursor(&encoded).unwrap();
        assert_eq!(decoded, cursor);
        // encode(decode(c)) == c untuk cursor yang terbentuk baik
        assert_eq!(encode_cursor(&decoded), encoded);
    }

    #[test]
    fn input_rusak_menjadi_none() {
        assert_eq!(decode_cursor(""), None);
        assert_eq!(decode_cursor("bukan base64 !!!"), None);
        // base64 valid tapi bukan JSON
        assert_eq!(decode_cursor(&URL_SAFE_NO_PAD.encode(b"halo dunia")), None);
        // JSON valid tapi bentuknya salah
        assert_eq!(decode_cursor(&URL_SAFE_NO_PAD.encode(b"{\"x\":1}")), None);
        // terlalu panjang
        let long = "A".repeat(MAX_CURSOR_LEN + 1);
        assert_eq!(decode_cursor(&long), None);
    }

    #[test]
    fn cursor_halaman_berikut() {
        let id = Uuid::new_v4();
        let rows = json!([
            {"id": Uuid::new_v4().to_string(), "created_at": "2025-10-01T00:00:00Z"},
            {"id": id.to_string(), "created_at": "2025-10-02T00:00:00Z"},
        ]);
        // halaman penuh: ada cursor lanjutan
        let next = next_cursor_from_rows(&rows, 2).unwrap();
        let decoded = decode_cursor(&next).unwrap();
        assert_eq!(decoded.id, id);
        assert_eq!(decoded.sort_value, "2025-10-02T00:00:00Z");
        // halaman belum penuh: tidak ada lanjutan
        assert_eq!(next_cursor_from_rows(&rows, 3), None);
        // bukan array
        assert_eq!(next_cursor_from_rows(&json!({"data": 1}), 2), None);
    }
}
