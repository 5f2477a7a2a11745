use quickcheck::{Arbitrary, Gen};

use crate::{Category, DiceSelection, Hand};

impl Arbitrary for Hand {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut faces = [0; 5];
        for face in faces.iter_mut() {
            *face = *g.choose(&[1, 2, 3, 4, 5, 6]).unwrap();
        }
        Hand::new(faces)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Lower faces are "simpler"
        let faces = self.faces();
        Box::new((0..faces.len()).filter(move |&i| faces[i] > 1).map(move |i| {
            let mut smaller = faces;
            smaller[i] -= 1;
            Hand::new(smaller)
        }))
    }
}

impl Arbitrary for Category {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Category::ALL).unwrap()
    }
}

impl Arbitrary for DiceSelection {
    fn arbitrary(g: &mut Gen) -> Self {
        (0..5).filter(|_| bool::arbitrary(g)).collect()
    }
}
