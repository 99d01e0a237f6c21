use sandbox_physics::{
    ControlInput, Controls, SimulationConfig,
    core::BodyEventType,
    scene::SceneBuilder,
    vehicle::InputSampler,
};

/// One leg of the scripted drive: controls held for a number of frames
struct Leg {
    frames: u32,
    held: Controls,
}

fn main() -> sandbox_physics::Result<()> {
    let mut world = SceneBuilder::sandbox().build(SimulationConfig::default())?;
    let mut sampler = InputSampler::new();

    // Straight at the first ramp, a jump, then a slow turn back.
    let script = [
        Leg { frames: 90, held: Controls::FORWARD },
        Leg { frames: 60, held: Controls::FORWARD },
        Leg { frames: 1, held: Controls::FORWARD | Controls::JUMP },
        Leg { frames: 120, held: Controls::FORWARD | Controls::LEFT },
        Leg { frames: 60, held: Controls::HANDBRAKE },
        Leg { frames: 90, held: Controls::BACK | Controls::RIGHT },
        Leg { frames: 120, held: Controls::empty() },
    ];

    let time_step = 1.0 / 60.0;
    let mut frame = 0u32;
    let mut contacts = 0usize;

    println!("Scripted Drive");
    println!("--------------");

    for leg in &script {
        for _ in 0..leg.frames {
            let input: ControlInput = sampler.sample(leg.held);
            world.step(time_step, &input);
            frame += 1;

            let events = world.get_events_mut();
            while let Some(event) = events.next_body_event() {
                match event.event_type {
                    BodyEventType::Jumped => println!("[{:>4}] car jumped", frame),
                    BodyEventType::Launched => println!("[{:>4}] car launched off a ramp", frame),
                    BodyEventType::Settled => println!("[{:>4}] body {} settled", frame, event.body.index()),
                    _ => {}
                }
            }
            while events.next_collision_event().is_some() {
                contacts += 1;
            }

            if frame % 30 == 0 {
                if let Some(car) = world.car_view() {
                    println!(
                        "[{:>4}] t={:.2}s car pos=({:.2}, {:.2}, {:.2}) dir=({:.2}, {:.2}) speed={:.2}",
                        frame,
                        world.get_time(),
                        car.position.x,
                        car.position.y,
                        car.position.z,
                        car.direction.x,
                        car.direction.z,
                        car.speed,
                    );
                }
            }
        }
    }

    let resting = world
        .bodies()
        .filter(|(_, body)| !body.is_static() && body.get_velocity().is_zero())
        .count();
    println!("{} contacts resolved over {} frames", contacts, frame);
    println!("{} dynamic bodies at rest", resting);

    Ok(())
}
