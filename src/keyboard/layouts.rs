use super::{Finger, KeyDef, KeyboardLayout};
use crate::language::Language;
use Finger::*;

const fn k(label: &'static str, value: &'static str, finger: Finger) -> KeyDef {
    KeyDef {
        label,
        value,
        shift_value: None,
        finger,
        width: 1.0,
    }
}

/// Key with a shifted symbol.
const fn ks(
    label: &'static str,
    value: &'static str,
    finger: Finger,
    shift_value: &'static str,
) -> KeyDef {
    KeyDef {
        label,
        value,
        shift_value: Some(shift_value),
        finger,
        width: 1.0,
    }
}

/// Wide control key.
const fn kw(label: &'static str, value: &'static str, finger: Finger, width: f32) -> KeyDef {
    KeyDef {
        label,
        value,
        shift_value: None,
        finger,
        width,
    }
}

fn space_row(ctrl_label: &'static str) -> Vec<KeyDef> {
    vec![
        kw(ctrl_label, "", LeftPinky, 1.5),
        kw("Alt", "", LeftThumb, 1.2),
        kw("Space", " ", RightThumb, 6.0),
        kw("AltGr", "", RightThumb, 1.2),
        kw(ctrl_label, "", RightPinky, 1.5),
    ]
}

fn german() -> KeyboardLayout {
    KeyboardLayout {
        id: "de",
        name: "German QWERTZ",
        rows: vec![
            vec![
                k("^", "^", LeftPinky),
                ks("1", "1", LeftPinky, "!"),
                ks("2", "2", LeftRing, "\""),
                ks("3", "3", LeftMiddle, "§"),
                ks("4", "4", LeftIndex, "$"),
                ks("5", "5", LeftIndex, "%"),
                ks("6", "6", RightIndex, "&"),
                ks("7", "7", RightIndex, "/"),
                ks("8", "8", RightMiddle, "("),
                ks("9", "9", RightRing, ")"),
                ks("0", "0", RightPinky, "="),
                ks("ß", "ß", RightPinky, "?"),
                k("´", "´", RightPinky),
            ],
            vec![
                kw("Tab", "Tab", LeftPinky, 1.5),
                k("Q", "q", LeftPinky),
                k("W", "w", LeftRing),
                k("E", "e", LeftMiddle),
                k("R", "r", LeftIndex),
                k("T", "t", LeftIndex),
                k("Z", "z", RightIndex),
                k("U", "u", RightIndex),
                k("I", "i", RightMiddle),
                k("O", "o", RightRing),
                k("P", "p", RightPinky),
                k("Ü", "ü", RightPinky),
                ks("+", "+", RightPinky, "*"),
                kw("Ent", "Enter", RightPinky, 1.2),
            ],
            vec![
                kw("Caps", "", LeftPinky, 1.8),
                k("A", "a", LeftPinky),
                k("S", "s", LeftRing),
                k("D", "d", LeftMiddle),
                k("F", "f", LeftIndex),
                k("G", "g", LeftIndex),
                k("H", "h", RightIndex),
                k("J", "j", RightIndex),
                k("K", "k", RightMiddle),
                k("L", "l", RightRing),
                k("Ö", "ö", RightPinky),
                k("Ä", "ä", RightPinky),
                ks("#", "#", RightPinky, "'"),
            ],
            vec![
                kw("Shft", "Shift", LeftPinky, 1.2),
                ks("<", "<", LeftPinky, ">"),
                k("Y", "y", LeftPinky),
                k("X", "x", LeftRing),
                k("C", "c", LeftMiddle),
                k("V", "v", LeftIndex),
                k("B", "b", LeftIndex),
                k("N", "n", RightIndex),
                k("M", "m", RightIndex),
                ks(",", ",", RightMiddle, ";"),
                ks(".", ".", RightRing, ":"),
                ks("-", "-", RightPinky, "_"),
                kw("Shft", "Shift", RightPinky, 2.5),
            ],
            space_row("Strg"),
        ],
    }
}

fn english() -> KeyboardLayout {
    KeyboardLayout {
        id: "en",
        name: "English QWERTY",
        rows: vec![
            vec![
                ks("`", "`", LeftPinky, "~"),
                ks("1", "1", LeftPinky, "!"),
                ks("2", "2", LeftRing, "@"),
                ks("3", "3", LeftMiddle, "#"),
                ks("4", "4", LeftIndex, "$"),
                ks("5", "5", LeftIndex, "%"),
                ks("6", "6", RightIndex, "^"),
                ks("7", "7", RightIndex, "&"),
                ks("8", "8", RightMiddle, "*"),
                ks("9", "9", RightRing, "("),
                ks("0", "0", RightPinky, ")"),
                ks("-", "-", RightPinky, "_"),
                ks("=", "=", RightPinky, "+"),
                kw("Bksp", "Backspace", RightPinky, 1.5),
            ],
            vec![
                kw("Tab", "Tab", LeftPinky, 1.5),
                k("Q", "q", LeftPinky),
                k("W", "w", LeftRing),
                k("E", "e", LeftMiddle),
                k("R", "r", LeftIndex),
                k("T", "t", LeftIndex),
                k("Y", "y", RightIndex),
                k("U", "u", RightIndex),
                k("I", "i", RightMiddle),
                k("O", "o", RightRing),
                k("P", "p", RightPinky),
                ks("[", "[", RightPinky, "{"),
                ks("]", "]", RightPinky, "}"),
                ks("\\", "\\", RightPinky, "|"),
            ],
            vec![
                kw("Caps", "", LeftPinky, 1.8),
                k("A", "a", LeftPinky),
                k("S", "s", LeftRing),
                k("D", "d", LeftMiddle),
                k("F", "f", LeftIndex),
                k("G", "g", LeftIndex),
                k("H", "h", RightIndex),
                k("J", "j", RightIndex),
                k("K", "k", RightMiddle),
                k("L", "l", RightRing),
                ks(";", ";", RightPinky, ":"),
                ks("'", "'", RightPinky, "\""),
                kw("Ent", "Enter", RightPinky, 2.0),
            ],
            vec![
                kw("Shft", "Shift", LeftPinky, 2.3),
                k("Z", "z", LeftPinky),
                k("X", "x", LeftRing),
                k("C", "c", LeftMiddle),
                k("V", "v", LeftIndex),
                k("B", "b", LeftIndex),
                k("N", "n", RightIndex),
                k("M", "m", RightIndex),
                ks(",", ",", RightMiddle, "<"),
                ks(".", ".", RightRing, ">"),
                ks("/", "/", RightPinky, "?"),
                kw("Shft", "Shift", RightPinky, 2.5),
            ],
            space_row("Ctrl"),
        ],
    }
}

fn french() -> KeyboardLayout {
    KeyboardLayout {
        id: "fr",
        name: "French AZERTY",
        rows: vec![
            vec![
                k("²", "²", LeftPinky),
                ks("&", "&", LeftPinky, "1"),
                ks("é", "é", LeftRing, "2"),
                ks("\"", "\"", LeftMiddle, "3"),
                ks("'", "'", LeftIndex, "4"),
                ks("(", "(", LeftIndex, "5"),
                ks("-", "-", RightIndex, "6"),
                ks("è", "è", RightIndex, "7"),
                ks("_", "_", RightMiddle, "8"),
                ks("ç", "ç", RightRing, "9"),
                ks("à", "à", RightPinky, "0"),
                ks(")", ")", RightPinky, "°"),
                ks("=", "=", RightPinky, "+"),
            ],
            vec![
                kw("Tab", "Tab", LeftPinky, 1.5),
                k("A", "a", LeftPinky),
                k("Z", "z", LeftRing),
                k("E", "e", LeftMiddle),
                k("R", "r", LeftIndex),
                k("T", "t", LeftIndex),
                k("Y", "y", RightIndex),
                k("U", "u", RightIndex),
                k("I", "i", RightMiddle),
                k("O", "o", RightRing),
                k("P", "p", RightPinky),
                k("^", "^", RightPinky),
                k("$", "$", RightPinky),
            ],
            vec![
                kw("Caps", "", LeftPinky, 1.8),
                k("Q", "q", LeftPinky),
                k("S", "s", LeftRing),
                k("D", "d", LeftMiddle),
                k("F", "f", LeftIndex),
                k("G", "g", LeftIndex),
                k("H", "h", RightIndex),
                k("J", "j", RightIndex),
                k("K", "k", RightMiddle),
                k("L", "l", RightRing),
                k("M", "m", RightPinky),
                k("ù", "ù", RightPinky),
                k("*", "*", RightPinky),
            ],
            vec![
                kw("Shft", "Shift", LeftPinky, 1.2),
                ks("<", "<", LeftPinky, ">"),
                k("W", "w", LeftPinky),
                k("X", "x", LeftRing),
                k("C", "c", LeftMiddle),
                k("V", "v", LeftIndex),
                k("B", "b", LeftIndex),
                k("N", "n", RightIndex),
                ks(",", ",", RightIndex, "?"),
                ks(";", ";", RightMiddle, "."),
                ks(":", ":", RightRing, "/"),
                ks("!", "!", RightPinky, "§"),
                kw("Shft", "Shift", RightPinky, 2.5),
            ],
            space_row("Ctrl"),
        ],
    }
}

fn spanish() -> KeyboardLayout {
    KeyboardLayout {
        id: "es",
        name: "Spanish QWERTY",
        rows: vec![
            vec![
                k("º", "º", LeftPinky),
                ks("1", "1", LeftPinky, "!"),
                ks("2", "2", LeftRing, "\""),
                ks("3", "3", LeftMiddle, "·"),
                ks("4", "4", LeftIndex, "$"),
                ks("5", "5", LeftIndex, "%"),
                ks("6", "6", RightIndex, "&"),
                ks("7", "7", RightIndex, "/"),
                ks("8", "8", RightMiddle, "("),
                ks("9", "9", RightRing, ")"),
                ks("0", "0", RightPinky, "="),
                ks("'", "'", RightPinky, "?"),
                ks("¡", "¡", RightPinky, "¿"),
            ],
            vec![
                kw("Tab", "Tab", LeftPinky, 1.5),
                k("Q", "q", LeftPinky),
                k("W", "w", LeftRing),
                k("E", "e", LeftMiddle),
                k("R", "r", LeftIndex),
                k("T", "t", LeftIndex),
                k("Y", "y", RightIndex),
                k("U", "u", RightIndex),
                k("I", "i", RightMiddle),
                k("O", "o", RightRing),
                k("P", "p", RightPinky),
                ks("`", "`", RightPinky, "^"),
                ks("+", "+", RightPinky, "*"),
            ],
            vec![
                kw("Caps", "", LeftPinky, 1.8),
                k("A", "a", LeftPinky),
                k("S", "s", LeftRing),
                k("D", "d", LeftMiddle),
                k("F", "f", LeftIndex),
                k("G", "g", LeftIndex),
                k("H", "h", RightIndex),
                k("J", "j", RightIndex),
                k("K", "k", RightMiddle),
                k("L", "l", RightRing),
                k("Ñ", "ñ", RightPinky),
                ks("´", "´", RightPinky, "¨"),
                k("Ç", "ç", RightPinky),
            ],
            vec![
                kw("Shft", "Shift", LeftPinky, 1.2),
                ks("<", "<", LeftPinky, ">"),
                k("Z", "z", LeftPinky),
                k("X", "x", LeftRing),
                k("C", "c", LeftMiddle),
                k("V", "v", LeftIndex),
                k("B", "b", LeftIndex),
                k("N", "n", RightIndex),
                k("M", "m", RightIndex),
                ks(",", ",", RightMiddle, ";"),
                ks(".", ".", RightRing, ":"),
                ks("-", "-", RightPinky, "_"),
                kw("Shft", "Shift", RightPinky, 2.5),
            ],
            space_row("Ctrl"),
        ],
    }
}

/// Layout for `language`. Italian shares the Spanish keys, Dutch the English ones.
pub fn build(language: Language) -> KeyboardLayout {
    match language {
        Language::De => german(),
        Language::En => english(),
        Language::Es => spanish(),
        Language::Fr => french(),
        Language::It => KeyboardLayout {
            id: "it",
            name: "Italian QWERTY",
            ..spanish()
        },
        Language::Nl => KeyboardLayout {
            id: "nl",
            name: "Dutch QWERTY",
            ..english()
        },
    }
}
