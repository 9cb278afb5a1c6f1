//! Fill in unidentified fingers from their labelled neighbours.

use handy_shared::FingerName;

/// Name the `Unknown` entries of `names` by walking outwards from the first
/// labelled finger.
///
/// Going backwards each unknown slot gets the previous name in the finger
/// cycle, going forwards the next one. A named slot on the way becomes the new
/// reference. A name already present in the list is never handed out again;
/// that slot stays `Unknown` but the walk still moves on from the skipped
/// name. Without any labelled finger nothing changes.
pub fn label_unknowns(names: &mut [FingerName]) {
    let Some(anchor) = names.iter().position(|n| n.is_known()) else {
        return;
    };

    let name = names[anchor];
    label_backward(names, anchor, name);
    label_forward(names, anchor, name);
}

fn label_backward(names: &mut [FingerName], anchor: usize, mut name: FingerName) {
    for i in (0..anchor).rev() {
        if !name.is_known() {
            break;
        }
        if names[i] == FingerName::Unknown {
            name = name.prev();
            if !names.contains(&name) {
                names[i] = name;
            }
        } else {
            name = names[i];
        }
    }
}

fn label_forward(names: &mut [FingerName], anchor: usize, mut name: FingerName) {
    for i in anchor + 1..names.len() {
        if !name.is_known() {
            break;
        }
        if names[i] == FingerName::Unknown {
            name = name.next();
            if !names.contains(&name) {
                names[i] = name;
            }
        } else {
            name = names[i];
        }
    }
}
