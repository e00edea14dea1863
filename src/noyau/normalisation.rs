// src/noyau/normalisation.rs
//
// Normalisation des glyphes d’opérateurs
// --------------------------------------
// Une entrée copiée depuis une page mal décodée arrive souvent avec de l’UTF-8
// relu en Windows-1252 (ou Latin-1) : "âœ•" au lieu de "✕", "âˆš" au lieu de "√"...
// On ramène tout ça vers l’alphabet canonique : + - * / ✕ ➗ √ ^ ( )
//
// Une seule passe gauche -> droite sur une table de correspondance.
// Aucun motif ne contient un caractère canonique de sortie => idempotent.

/// Table (motif abîmé, remplacement canonique).
/// Les motifs les plus longs doivent précéder les plus courts s’ils partagent un préfixe.
const TABLE_GLYPHES: &[(&str, &str)] = &[
    // ✕ U+2715 : E2 9C 95
    ("\u{e2}\u{153}\u{2022}", "✕"), // cp1252 : "âœ•"
    ("\u{e2}\u{9c}\u{95}", "✕"),    // latin-1
    // ➗ U+2797 : E2 9E 97
    ("\u{e2}\u{17e}\u{2014}", "➗"), // cp1252 : "âž—"
    ("\u{e2}\u{9e}\u{97}", "➗"),    // latin-1
    // √ U+221A : E2 88 9A
    ("\u{e2}\u{2c6}\u{161}", "√"), // cp1252 : "âˆš"
    ("\u{e2}\u{88}\u{9a}", "√"),   // latin-1
    // − U+2212 (moins typographique) : E2 88 92
    ("\u{e2}\u{2c6}\u{2019}", "-"), // cp1252 : "âˆ’"
    ("\u{e2}\u{88}\u{92}", "-"),    // latin-1
    // glyphes propres mais hors alphabet
    ("\u{2212}", "-"),
    ("×", "✕"),
    ("÷", "➗"),
];

/// Réécrit chaque séquence abîmée connue en son opérateur canonique.
///
/// Fonction pure et totale ; `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut reste = s;

    'scan: while let Some(c) = reste.chars().next() {
        for (motif, canon) in TABLE_GLYPHES {
            if let Some(apres) = reste.strip_prefix(motif) {
                out.push_str(canon);
                reste = apres;
                continue 'scan;
            }
        }
        out.push(c);
        reste = &reste[c.len_utf8()..];
    }

    out
}
