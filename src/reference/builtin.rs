use super::{AnchorBook, Band, ReferenceTable};
use crate::keys::{Metric, Skill};
use std::collections::HashMap;
use strum::IntoEnumIterator;

// Standard six-step ladder shared by most metrics.
const STANDARD_BOUNDS: [(f64, f64); 6] = [
    (0.0, 5.0),
    (6.0, 11.0),
    (12.0, 17.0),
    (18.0, 23.0),
    (24.0, 29.0),
    (30.0, 100.0),
];

// Movement technique is rated on a coarser five-step ladder.
const MOVEMENT_BOUNDS: [(f64, f64); 5] = [
    (0.0, 7.0),
    (8.0, 15.0),
    (16.0, 23.0),
    (24.0, 31.0),
    (32.0, 100.0),
];

type Rung = (&'static str, &'static str);

fn ladder(bounds: &[(f64, f64)], rungs: &[Rung]) -> Vec<Band> {
    debug_assert_eq!(bounds.len(), rungs.len());
    bounds
        .iter()
        .zip(rungs)
        .map(|(&(min, max), &(name, description))| Band::new(min, max, name, description))
        .collect()
}

const DEFAULT_COMPONENT: [Rung; 6] = [
    ("Foundation", "Just starting to show this quality; needs constant coaching cues."),
    ("Developing", "Shows up in closed drills but breaks down as soon as the feed changes."),
    ("Competent", "Dependable in cooperative rallies; patchy once points are live."),
    ("Proficient", "Holds up in live points against players of the same level."),
    ("Advanced", "A clear strength in match play, including against stronger opponents."),
    ("Elite", "Tournament-grade execution that survives pressure and fatigue."),
];

const SERVE_POWER: [Rung; 6] = [
    ("Push", "Ball is pushed into play with little racquet-head speed."),
    ("Swing", "A full swing is forming but pace is modest and inconsistent."),
    ("Pace", "Regularly produces enough pace to stop easy attacks on the return."),
    ("Drive", "First serve forces defensive returns from peers."),
    ("Heavy", "Pace and weight win free points in most service games."),
    ("Bomb", "Serve speed is a genuine match-winning weapon."),
];

const SERVE_ACCURACY: [Rung; 6] = [
    ("In the Box", "Focus is on landing the serve anywhere in the box."),
    ("Side Aware", "Can favour deuce or ad side targets when not under pressure."),
    ("Target Hitter", "Finds wide and T targets in practice sets."),
    ("Placement", "Mixes targets deliberately within a service game."),
    ("Sharpshooter", "Hits chosen spots on big points with first and second serves."),
    ("Surgeon", "Pin-point placement with disguise from the same toss."),
];

const FOREHAND_SPIN: [Rung; 6] = [
    ("Flat", "Ball leaves the strings flat; margin over the net comes from height only."),
    ("Brushing", "Low-to-high path appears but contact slips back to flat under pace."),
    ("Topspin", "Consistent topspin gives safe net clearance in rallies."),
    ("Shape", "Uses spin to push opponents back and open angles."),
    ("Heavy Ball", "Kicking topspin troubles opponents above shoulder height."),
    ("Spin Master", "Varies spin, height and depth at will, including on the run."),
];

const BACKHAND_SPIN: [Rung; 6] = [
    ("Flat", "Little deliberate spin; backhand is a block or push."),
    ("Brushing", "Topspin attempts appear with a stable grip change."),
    ("Topspin", "Rallies with topspin crosscourt without losing depth."),
    ("Two Speeds", "Switches between drive and slice to change rhythm."),
    ("Disruptor", "Slice and topspin are used tactically to break patterns."),
    ("Spin Master", "Full spin repertoire including low slice approaches under pressure."),
];

const MOVEMENT_TECHNIQUE: [Rung; 5] = [
    ("Flat-Footed", "Reaches the ball late; split step is missing or mistimed."),
    ("Reactive", "Split step is present; first step is slow and recovery is drifting."),
    ("Balanced", "Arrives balanced on most balls and recovers to a sensible position."),
    ("Dynamic", "Efficient adjustment steps, explosive first step, quick recovery."),
    ("Court Coverage", "Defends and transitions to offence from any part of the court."),
];

const SERVE_OVERALL: [Rung; 6] = [
    ("Getting It In", "Serve starts the point but gives the returner the initiative."),
    ("Rhythm Builder", "Toss and swing are repeatable; double faults still common."),
    ("Reliable Starter", "Rarely double faults and the second serve holds up."),
    ("Point Builder", "Serve sets up the first ball and the point pattern."),
    ("Weapon in Progress", "Earns free points and protects service games under pressure."),
    ("Serve Weapon", "The serve is a weapon opponents plan their match around."),
];

const RETURN_OVERALL: [Rung; 6] = [
    ("Block Back", "Gets the racquet on the ball; returns are short and high."),
    ("Neutralizer", "Puts most second serves back deep enough to start a rally."),
    ("Rally Starter", "Neutralizes first serves and attacks weak second serves."),
    ("Pressure Return", "Return regularly takes time away from the server."),
    ("Break Threat", "Return creates break chances in most return games."),
    ("Return Weapon", "Return is a consistent source of breaks against strong servers."),
];

const FOREHAND_OVERALL: [Rung; 6] = [
    ("Contact Finder", "Working on clean contact and a full swing path."),
    ("Rally Builder", "Keeps cooperative rallies going with a stable forehand."),
    ("Consistent Hitter", "Forehand holds up in live rallies with decent depth."),
    ("Pattern Player", "Uses the forehand to run patterns and move opponents."),
    ("Forehand Threat", "Dictates with the forehand from the middle of the court."),
    ("Forehand Weapon", "Finishes points from anywhere with the forehand."),
];

const BACKHAND_OVERALL: [Rung; 6] = [
    ("Contact Finder", "Backhand is a survival shot; preparation is late."),
    ("Rally Builder", "Keeps crosscourt backhand rallies going at moderate pace."),
    ("Consistent Hitter", "Backhand no longer the obvious target in live play."),
    ("Pattern Player", "Changes direction with the backhand when the ball allows."),
    ("Backhand Threat", "Attacks short balls and passes with the backhand."),
    ("Backhand Weapon", "Backhand wins points outright and absorbs pace under pressure."),
];

const VOLLEY_OVERALL: [Rung; 6] = [
    ("Net Visitor", "Comes forward only when pulled in; volleys are swung at."),
    ("Block Volleyer", "Short punch volleys go back into play from a set position."),
    ("Net Steady", "Handles mid-pace volleys with depth and a stable wrist."),
    ("Net Rusher", "Closes the net after approaches and finishes high volleys."),
    ("Net Closer", "Low volleys and touch volleys are reliable in matches."),
    ("Net Master", "Owns the net with angles, touch and reflex volleys."),
];

const OVERHEAD_OVERALL: [Rung; 6] = [
    ("Tracker", "Tracking the lob is the focus; contact is often late."),
    ("Let-Bouncer", "Lets the lob bounce and plays it back safely."),
    ("Put-Away Learner", "Hits smashes in drills with a turned body and pointed arm."),
    ("Closer", "Puts away short lobs in live play."),
    ("Finisher", "Retreats and smashes deep lobs with direction."),
    ("Overhead Weapon", "Overhead ends points from any lob, including scissor-kick smashes."),
];

const MOVEMENT_OVERALL: [Rung; 6] = [
    ("First Steps", "Movement basics like ready position and split step are being learned."),
    ("Court Aware", "Moves to the ball but recovers late and off balance."),
    ("Steady Mover", "Covers most balls in cooperative rallies with sound recovery."),
    ("Quick Feet", "Adjustment steps keep the strike zone stable in live points."),
    ("Athlete", "Movement creates time and turns defence into offence."),
    ("Court Coverage", "Elite speed, balance and anticipation across the whole court."),
];

fn overall_rungs(skill: Skill) -> &'static [Rung; 6] {
    match skill {
        Skill::Serve => &SERVE_OVERALL,
        Skill::Return => &RETURN_OVERALL,
        Skill::Forehand => &FOREHAND_OVERALL,
        Skill::Backhand => &BACKHAND_OVERALL,
        Skill::Volley => &VOLLEY_OVERALL,
        Skill::Overhead => &OVERHEAD_OVERALL,
        Skill::Movement => &MOVEMENT_OVERALL,
    }
}

fn component_bands(skill: Skill, metric: Metric) -> Vec<Band> {
    match (skill, metric) {
        (Skill::Serve, Metric::Power) => ladder(&STANDARD_BOUNDS, &SERVE_POWER),
        (Skill::Serve, Metric::Accuracy) => ladder(&STANDARD_BOUNDS, &SERVE_ACCURACY),
        (Skill::Forehand, Metric::Spin) => ladder(&STANDARD_BOUNDS, &FOREHAND_SPIN),
        (Skill::Backhand, Metric::Spin) => ladder(&STANDARD_BOUNDS, &BACKHAND_SPIN),
        (Skill::Movement, Metric::Technique) => ladder(&MOVEMENT_BOUNDS, &MOVEMENT_TECHNIQUE),
        _ => ladder(&STANDARD_BOUNDS, &DEFAULT_COMPONENT),
    }
}

fn book(entries: &[(&str, &[&str])]) -> AnchorBook {
    entries
        .iter()
        .map(|(band, notes)| {
            (
                band.to_string(),
                notes.iter().map(|n| n.to_string()).collect(),
            )
        })
        .collect()
}

fn builtin_anchors() -> HashMap<(Skill, Metric), AnchorBook> {
    let mut anchors = HashMap::new();

    anchors.insert(
        (Skill::Serve, Metric::Consistency),
        book(&[
            ("Foundation", &["Fewer than 3 of 10 serves land in"]),
            ("Developing", &["4-5 of 10 first serves in", "Toss drifts forward under pressure"]),
            ("Competent", &["6 of 10 first serves in", "Second serve rarely double faults"]),
            ("Proficient", &["7 of 10 first serves in during sets"]),
            ("Advanced", &["Holds 70% first-serve rate in tournament matches"]),
            ("Elite", &["Double faults are rare even at 30-40"]),
        ]),
    );

    anchors.insert(
        (Skill::Forehand, Metric::Spin),
        book(&[
            ("Flat", &["Net clearance under 30 cm"]),
            ("Topspin", &["Ball dips inside the baseline at rally pace"]),
            ("Heavy Ball", &["Opponents take the ball above the shoulder"]),
        ]),
    );

    anchors.insert(
        (Skill::Movement, Metric::Technique),
        book(&[
            ("Flat-Footed", &["No split step on the opponent's contact"]),
            ("Reactive", &["Split step timed on most feeds", "Crossover step missing on wide balls"]),
            ("Balanced", &["Open-stance recovery on wide forehands"]),
            ("Dynamic", &["Recovers to the middle before the opponent's contact"]),
            ("Court Coverage", &["Sliding defence on hard courts"]),
        ]),
    );

    anchors.insert(
        (Skill::Volley, Metric::Overall),
        book(&[
            ("Block Volleyer", &["Racquet face stays in front of the body"]),
            ("Net Closer", &["Low volleys land past the service line"]),
        ]),
    );

    anchors
}

pub fn build() -> ReferenceTable {
    let mut bands = HashMap::new();

    for skill in Skill::iter() {
        for metric in Metric::COMPONENTS {
            bands.insert((skill, metric), component_bands(skill, metric));
        }
        bands.insert(
            (skill, Metric::Overall),
            ladder(&STANDARD_BOUNDS, overall_rungs(skill)),
        );
    }

    ReferenceTable::from_parts(bands, builtin_anchors())
}
