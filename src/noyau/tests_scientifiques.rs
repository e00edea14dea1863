//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : confronter le moteur à l’arithmétique f64 écrite à la main.
//! - précédence / gauche-à-droite
//! - racines n-ièmes (indice explicite, défaut carré, négatifs)
//! - pôles de tan au voisinage de π/2 + kπ
//! - indéfini : se propage, ne redevient jamais un nombre
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - ^ est gauche-à-droite comme les autres (2^3^2 = 64).
//! - Le moins collé au nombre lie plus fort que ^ : -2^2 = (-2)^2 = 4.
//! - Un opérateur sans opérande est ignoré ; c’est la pile finale qui tranche.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::{assert_abs_diff_eq, assert_relative_eq};

use super::{eval_expression, Valeur};

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr)
        .nombre()
        .unwrap_or_else(|| panic!("expr={expr:?} indéfini"))
}

fn assert_indefini(expr: &str) {
    assert_eq!(eval_expression(expr), Valeur::Indefini, "expr={expr:?}");
}

/* ------------------------ Arithmétique de référence ------------------------ */

#[test]
fn campagne_precedence() {
    let cas: &[(&str, f64)] = &[
        ("1+2*3-4/5", 1.0 + 2.0 * 3.0 - 4.0 / 5.0),
        ("2*3+4*5", 2.0 * 3.0 + 4.0 * 5.0),
        ("2+3^2*2", 2.0 + 9.0 * 2.0),
        ("100/4/5*2", 100.0 / 4.0 / 5.0 * 2.0),
        ("7-2-1+3", 7.0 - 2.0 - 1.0 + 3.0),
        ("(1+2)*(3+4)/(5-2)", 3.0 * 7.0 / 3.0),
        ("2*(3+(4-1)*2)", 2.0 * (3.0 + 3.0 * 2.0)),
        ("1.5*4", 6.0),
        (".5+.25", 0.75),
        ("3.", 3.0),
        ("  12  +  0.5 ", 12.5),
    ];

    for (expr, attendu) in cas {
        assert_relative_eq!(eval_ok(expr), *attendu, epsilon = 1e-12);
    }
}

#[test]
fn campagne_gauche_a_droite() {
    assert_relative_eq!(eval_ok("2^3^2"), 64.0);
    assert_relative_eq!(eval_ok("2^(3^2)"), 512.0);
    assert_relative_eq!(eval_ok("64/4/2"), 8.0);
    assert_relative_eq!(eval_ok("-2^2"), 4.0);
    assert_relative_eq!(eval_ok("0-2^2"), -4.0);
}

#[test]
fn campagne_exemples_de_reference() {
    assert_relative_eq!(eval_ok("((3.5+4.9)-(10/2))*3.40"), 11.56, epsilon = 1e-9);
    assert_indefini("5/0");
    assert_relative_eq!(eval_ok("3√(27)"), 3.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("2√(25)"), 5.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("4√(625)"), 5.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("2(3+4)"), 14.0);
    assert_relative_eq!(eval_ok("-5+3"), -2.0);
    assert_relative_eq!(eval_ok("2+3*4"), 14.0);
    assert_relative_eq!(eval_ok("(2+3)*4"), 20.0);
}

/* ------------------------ Racines ------------------------ */

#[test]
fn campagne_racines() {
    for n in 2..=7 {
        let x = 3.0_f64.powi(n);
        let expr = format!("{n}√({x})");
        assert_relative_eq!(eval_ok(&expr), 3.0, epsilon = 1e-9);
    }

    // impaires négatives : racine réelle
    assert_relative_eq!(eval_ok("3√(-27)"), -3.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("5√(-32)"), -2.0, epsilon = 1e-12);

    // paires négatives : indéfini
    assert_indefini("2√(-1)");
    assert_indefini("4√(-81)");
    assert_indefini("√(-0.5)");

    // indice non entier, nul
    assert_relative_eq!(eval_ok("0.5√(3)"), 9.0, epsilon = 1e-12);
    assert_indefini("0√(3)");
}

#[test]
fn campagne_racine_dans_expression() {
    assert_relative_eq!(eval_ok("1+√(9)*2"), 7.0);
    assert_relative_eq!(eval_ok("√(9)√(4)"), 6.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("2*3√(8)"), 4.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("√(√(16))"), 2.0);
}

/* ------------------------ Trig ------------------------ */

#[test]
fn campagne_trig_valeurs() {
    for i in -8..=8 {
        let x = i as f64 * 0.37;
        assert_abs_diff_eq!(eval_ok(&format!("sin({x})")), x.sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(eval_ok(&format!("cos({x})")), x.cos(), epsilon = 1e-12);
    }
    assert_abs_diff_eq!(eval_ok("sin(1)^2+cos(1)^2"), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(eval_ok("sin(2*3)"), 6.0_f64.sin(), epsilon = 1e-12);
}

#[test]
fn campagne_tan_poles() {
    for k in -3..=3 {
        let pole = FRAC_PI_2 + k as f64 * PI;
        // |cos| reste sous 1e-10 pour ces flottants
        assert!(pole.cos().abs() < 1e-10);
        assert_indefini(&format!("tan({pole})"));

        let loin = pole + 0.1;
        assert_abs_diff_eq!(
            eval_ok(&format!("tan({loin})")),
            loin.tan(),
            epsilon = 1e-9
        );
    }
}

/* ------------------------ Indéfini : propagation ------------------------ */

#[test]
fn campagne_indefini_absorbant() {
    for expr in [
        "5/0*0",
        "0*(5/0)",
        "1+2/(3-3)",
        "sin(1/0)",
        "√(-1)+10",
        "(2√(-4))^0",
        "tan(1.5707963267948966)*0",
        "(-2)^0.5-(-2)^0.5",
        "2^2000/2^2000",
    ] {
        assert_indefini(expr);
    }
}

#[test]
fn campagne_mal_forme() {
    for expr in ["", "   ", "(", ")", "(1+2", "1+2)", "()", "1 2", "sin", "abc", "2#3"] {
        assert_indefini(expr);
    }
}

#[test]
fn campagne_division_epsilon() {
    assert_indefini("1/0.00000000001");
    assert_relative_eq!(eval_ok("1/0.000000001"), 1e9, epsilon = 1e-3);
}
