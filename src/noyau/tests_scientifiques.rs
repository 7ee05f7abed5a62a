//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Calcul en f64 : les identités trig sont vérifiées à epsilon près, jamais à l’égalité.
//! - La mise en forme arrondit à 10 décimales : les identités qui tombent juste
//!   (sin²+cos² = 1) s’affichent donc comme des entiers.
//! - Stress : l’entrée est bornée par Options::longueur_max et l’imbrication par
//!   Options::profondeur_max ; on vérifie que ces bornes coupent AVANT la pile.

use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use super::erreur::ErrorKind;
use super::options::{ModeModulo, Options};
use super::{eval_expression, evaluate, evaluate_with};

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn affiche(expr: &str, options: &Options) -> String {
    let (r, _d) =
        eval_expression(expr, options).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    r.to_string()
}

fn assert_genre(expr: &str, attendu: ErrorKind) {
    match evaluate(expr) {
        Ok(v) => panic!("expr={expr:?} aurait dû échouer ({attendu:?}), valeur={v}"),
        Err(e) => assert_eq!(e.kind(), attendu, "expr={expr:?} err={e}"),
    }
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identités trig ------------------------ */

#[test]
fn sci_pythagore() {
    for x in ["0", "0.5", "1", "pi/3", "2.5", "-7", "100"] {
        let v = eval_ok(&format!("sin({x})^2 + cos({x})^2"));
        assert_relative_eq!(v, 1.0, epsilon = 1e-12);
        assert_eq!(
            affiche(&format!("sin({x})^2 + cos({x})^2"), &Options::default()),
            "1",
            "x={x}"
        );
    }
}

#[test]
fn sci_reciproques() {
    assert_relative_eq!(eval_ok("asin(sin(0.5))"), 0.5, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("acos(cos(0.5))"), 0.5, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("atan(tan(0.5))"), 0.5, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("ln(exp(3))"), 3.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("radians(degrees(1.25))"), 1.25, epsilon = 1e-12);
}

#[test]
fn sci_symetries() {
    // sin(-x) = -sin(x), cos(-x) = cos(x)
    assert_relative_eq!(eval_ok("sin(-pi/4)"), -eval_ok("sin(pi/4)"));
    assert_relative_eq!(eval_ok("cos(-pi/3)"), eval_ok("cos(pi/3)"));
    assert_eq!(affiche("cos(pi/3)", &Options::default()), "0.5");
    assert_eq!(affiche("sin(pi/4)", &Options::default()), "0.7071067812");
}

#[test]
fn sci_hyperboliques() {
    // cosh² - sinh² = 1
    assert_relative_eq!(eval_ok("cosh(1.5)^2 - sinh(1.5)^2"), 1.0, epsilon = 1e-12);
    assert_relative_eq!(eval_ok("tanh(0.3)"), eval_ok("sinh(0.3)/cosh(0.3)"));
}

/* ------------------------ Lois de précédence ------------------------ */

#[test]
fn sci_precedences() {
    // chaque paire : sans parenthèses == avec les parenthèses implicites
    let paires = [
        ("1+2*3", "1+(2*3)"),
        ("2*3^2", "2*(3^2)"),
        ("-3^2", "-(3^2)"),
        ("2^3^2", "2^(3^2)"),
        ("100/10/5", "(100/10)/5"),
        ("10-3-2", "(10-3)-2"),
        ("17%5*2", "(17%5)*2"),
        ("-2*-3", "(-2)*(-3)"),
        ("2^-2", "2^(-2)"),
    ];
    for (a, b) in paires {
        assert_eq!(eval_ok(a), eval_ok(b), "{a} vs {b}");
    }
}

#[test]
fn sci_log_conventions() {
    // log = base 10, ln = naturel : convention figée
    assert_relative_eq!(eval_ok("log(1000)"), 3.0);
    assert_relative_eq!(eval_ok("ln(e^2)"), 2.0);
    assert_relative_eq!(eval_ok("log(e)"), std::f64::consts::LOG10_E);
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle_bornes() {
    assert_eq!(eval_ok("factorial(0)"), 1.0);
    assert_eq!(eval_ok("factorial(20)"), 2_432_902_008_176_640_000.0);
    assert!(eval_ok("factorial(170)").is_finite());
    assert_genre("factorial(171)", ErrorKind::Depassement);
    assert_genre("factorial(1000000000)", ErrorKind::Depassement);
    assert_eq!(
        affiche("factorial(20)", &Options::default()),
        "2432902008176640000"
    );
}

/* ------------------------ Mise en forme ------------------------ */

#[test]
fn sci_entiers_sans_point_decimaux_bornes() {
    let o = Options::default();
    for expr in ["2+2", "2^10", "-5*3", "sqrt(144)", "factorial(12)", "10^15"] {
        let s = affiche(expr, &o);
        assert!(!s.contains('.'), "expr={expr:?} => {s}");
    }
    for expr in ["1/3", "pi", "e", "sqrt(2)", "1/7", "-22/7", "ln(10)"] {
        let s = affiche(expr, &o);
        let frac = s.split('.').nth(1).unwrap_or("");
        assert!(frac.len() <= 10, "expr={expr:?} => {s}");
    }
}

#[test]
fn sci_mise_en_forme_idempotente() {
    let o = Options::default();
    for expr in ["1/3", "2^0.5", "-1/7", "0.1+0.2"] {
        let a = eval_expression(expr, &o);
        let b = eval_expression(expr, &o);
        assert_eq!(a, b, "expr={expr:?}");
    }
}

/* ------------------------ Modes ------------------------ */

#[test]
fn sci_reste_vs_pourcent() {
    let reste = Options::default();
    let pourcent = Options {
        modulo: ModeModulo::Pourcent,
        ..Options::default()
    };

    assert_eq!(evaluate_with("10 % 4", &reste), Ok(2.0));
    assert_eq!(
        evaluate_with("10 % 4", &pourcent).unwrap_err().kind(),
        ErrorKind::Syntaxe
    );
    assert_eq!(evaluate_with("10%", &pourcent), Ok(0.1));
    assert_eq!(
        evaluate_with("10%", &reste).unwrap_err().kind(),
        ErrorKind::Syntaxe
    );
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_longue_chaine_additive() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 499 "+1" : sous la longueur max par défaut (1000)
    let expr = format!("1{}", "+1".repeat(499));
    assert!(expr.chars().count() <= 1000);
    assert_eq!(affiche(&expr, &Options::default()), "500");

    budget(t0, max);
}

#[test]
fn sci_entree_trop_longue_coupee() {
    let expr = format!("1{}", "+1".repeat(600));
    let e = eval_expression(&expr, &Options::default()).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Limite);
}

#[test]
fn sci_imbrication_profonde_coupee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let profond = format!("{}1{}", "(".repeat(400), ")".repeat(400));
    let e = evaluate(&profond).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Limite);

    let raisonnable = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(evaluate(&raisonnable), Ok(1.0));

    budget(t0, max);
}

#[test]
fn sci_puissances_en_tour() {
    // 2^2^2^2 = 2^(2^(2^2)) = 65536
    assert_eq!(eval_ok("2^2^2^2"), 65536.0);
    assert_genre("2^2^2^2^2^2", ErrorKind::Depassement);
}
