//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte seulement les erreurs d’évaluation attendues (division par zéro,
//!   hors domaine, dépassement) : une expression générée est toujours bien formée
//! - invariant clé : evaluate et eval_expression disent la même chose

use std::time::{Duration, Instant};

use super::erreur::ErrorKind;
use super::format::formater;
use super::options::{ModeModulo, Options};
use super::{eval_expression, evaluate, evaluate_with};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(kind: ErrorKind) -> bool {
    // Liste blanche : une expression bien formée ne peut échouer qu’à l’évaluation.
    matches!(
        kind,
        ErrorKind::DivisionParZero | ErrorKind::Domaine | ErrorKind::Depassement
    )
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // petits entiers, zéro inclus (utile pour les divisions), quelques décimaux
    match rng.pick(10) {
        0 => "0".to_string(),
        1 => "0.5".to_string(),
        2 => "2.25".to_string(),
        n => format!("{n}"),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("-{}", gen_nombre(rng)),
        _ => gen_nombre(rng),
    }
}

const FONCTIONS_1: [&str; 12] = [
    "sin", "cos", "atan", "sqrt", "ln", "log", "abs", "floor", "ceil", "tanh", "exp", "asin",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let sous = |rng: &mut Rng| gen_expr(rng, depth - 1);

    match rng.pick(10) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", sous(rng), sous(rng)),
        2 => format!("({}-{})", sous(rng), sous(rng)),
        3 => format!("({}*{})", sous(rng), sous(rng)),
        4 => format!("({}/{})", sous(rng), sous(rng)),
        5 => format!("({}%{})", sous(rng), sous(rng)),
        6 => format!("({}^{})", sous(rng), gen_nombre(rng)),
        7 => format!("pow({}, {})", sous(rng), sous(rng)),
        8 => {
            let f = FONCTIONS_1[rng.pick(FONCTIONS_1.len() as u32) as usize];
            format!("{f}({})", sous(rng))
        }
        _ => {
            if rng.coin() {
                format!("-{}", sous(rng))
            } else {
                format!("factorial({})", gen_nombre(rng))
            }
        }
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_coherence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let options = Options::default();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let brut = evaluate(&expr);
        assert_eq!(brut, evaluate(&expr), "non déterministe: expr={expr:?}");

        match (brut, eval_expression(&expr, &options)) {
            (Ok(v), Ok((r, _d))) => {
                assert!(v.is_finite(), "expr={expr:?} v={v}");
                assert_eq!(formater(v), Ok(r), "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(a), Err(b)) => {
                assert_eq!(a, b, "expr={expr:?}");
                // On accepte certaines erreurs attendues en fuzz.
                assert!(
                    is_erreur_attendue(a.kind()),
                    "erreur non attendue: expr={expr:?} err={a}"
                );
                seen_err += 1;
            }
            (a, b) => panic!("incohérence: expr={expr:?} evaluate={a:?} pipeline={b:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_texte_arbitraire_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // alphabet qui mélange le légal et l’illégal
    let alphabet: Vec<char> = "0123456789.+-*/%^(),πe√×÷ sinqrtlogpxa#$_=".chars().collect();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let n = rng.pick(24) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // aucune panique, déterminisme, et un succès est toujours fini
        let a = evaluate(&s);
        assert_eq!(a, evaluate(&s), "non déterministe: {s:?}");
        if let Ok(v) = a {
            assert!(v.is_finite(), "s={s:?} v={v}");
        }
        let _ = eval_expression(&s, &Options::default());
    }
}

#[test]
fn fuzz_safe_mode_pourcent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let options = Options {
        modulo: ModeModulo::Pourcent,
        ..Options::default()
    };
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..100 {
        budget(t0, max);

        let a = gen_nombre(&mut rng);
        let b = gen_nombre(&mut rng);

        // x% == x/100 quelle que soit la valeur
        let pourcent = evaluate_with(&format!("{a}%"), &options);
        let divise = evaluate_with(&format!("{a}/100"), &options);
        assert_eq!(pourcent, divise, "a={a}");

        // le '%' binaire n’existe pas dans ce mode
        let e = evaluate_with(&format!("{a} % {b}"), &options).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Syntaxe, "a={a} b={b}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    let options = Options {
        longueur_max: expr.chars().count(),
        ..Options::default()
    };
    budget(t0, max);

    let (r, _d) = eval_expression(&expr, &options).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(r.to_string(), "400");
    budget(t0, max);
}

#[test]
fn fuzz_safe_signes_empiles() {
    // chaque signe compte pour un niveau : 200 passent, 300 sont coupés proprement
    for (n, attendu) in [(200usize, true), (300, false)] {
        let expr = format!("{}1", "-".repeat(n));
        match evaluate(&expr) {
            Ok(v) => {
                assert!(attendu, "n={n} aurait dû être coupé");
                assert_eq!(v, if n % 2 == 0 { 1.0 } else { -1.0 });
            }
            Err(e) => {
                assert!(!attendu, "n={n} err={e}");
                assert_eq!(e.kind(), ErrorKind::Limite);
            }
        }
    }
}
