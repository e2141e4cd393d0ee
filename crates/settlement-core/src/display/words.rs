//! Korean cardinal reading of an amount, as shown under the amount field.

const DIGITS: [&str; 10] = ["", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];
const SMALL_UNITS: [&str; 4] = ["", "십", "백", "천"];
const LARGE_UNITS: [&str; 5] = ["", "만", "억", "조", "경"];

/// `0` → `영`, `11000` → `만 천`, `123456` → `십이만 삼천사백오십육`.
///
/// A leading 일 is dropped before 십, 백, 천 and 만 but kept before 억 and
/// larger units. Groups of four digits are separated by a space.
pub fn korean_words(n: u64) -> String {
    if n == 0 {
        return "영".to_string();
    }

    let mut groups: Vec<String> = Vec::new();
    let mut rest = n;
    let mut unit = 0;
    while rest > 0 {
        let group = (rest % 10_000) as u16;
        if group > 0 {
            let word = if group == 1 && unit == 1 {
                LARGE_UNITS[1].to_string()
            } else {
                format!("{}{}", group_words(group), LARGE_UNITS[unit])
            };
            groups.push(word);
        }
        rest /= 10_000;
        unit += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Reading of 1..=9999 without spaces.
fn group_words(group: u16) -> String {
    let mut out = String::new();
    for pos in (0..4).rev() {
        let digit = ((group / 10u16.pow(pos as u32)) % 10) as usize;
        if digit == 0 {
            continue;
        }
        if !(digit == 1 && pos > 0) {
            out.push_str(DIGITS[digit]);
        }
        out.push_str(SMALL_UNITS[pos]);
    }
    out
}
