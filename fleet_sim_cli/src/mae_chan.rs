use std::sync::Arc;

use fleet_sim::{
    geospatial::Coordinate,
    route::{Route, StopSet},
    units::kmh::Kmh,
    vehicle::{VehicleConfig, VehicleConfigBuilder},
};
use jiff::SignedDuration;

use crate::fleet_file::{FleetDefinition, NamedRoute};

pub const ROUTE_NAME: &str = "mae-chan";

/// Loop through Mae Chan, Chiang Rai, every second point of the surveyed track.
const WAYPOINTS: [(f64, f64); 191] = [
    (20.0589569, 99.8997827), (20.0589582, 99.8996909), (20.0589355, 99.8993425),
    (20.0589009, 99.8991599), (20.058791, 99.898817), (20.0586996, 99.8986305),
    (20.0584751, 99.8983486), (20.0581434, 99.8979867), (20.0575624, 99.8975002),
    (20.0568365, 99.8967415), (20.0566951, 99.8966574), (20.0565872, 99.8965966),
    (20.056496, 99.8965552), (20.0562761, 99.8964775), (20.0562133, 99.8964639),
    (20.0560645, 99.8964495), (20.0558569, 99.8964328), (20.0556463, 99.8964208),
    (20.0554879, 99.8963948), (20.055355, 99.8963608), (20.0552151, 99.8962873),
    (20.05516, 99.8962275), (20.0550769, 99.8960826), (20.0550564, 99.8958915),
    (20.0550735, 99.8956552), (20.0550666, 99.8954516), (20.0550507, 99.8953296),
    (20.0550091, 99.8952005), (20.0549606, 99.8950741), (20.0549065, 99.8949481),
    (20.054836, 99.8947932), (20.0547274, 99.8945201), (20.0546603, 99.8943543),
    (20.0546082, 99.8941628), (20.0544771, 99.8937535), (20.0543244, 99.8934594),
    (20.0541843, 99.8932663), (20.0539791, 99.8930004), (20.0538175, 99.8928392),
    (20.0537012, 99.8927505), (20.0533984, 99.892581), (20.0532655, 99.8925256),
    (20.0531458, 99.8924896), (20.0528449, 99.8924002), (20.052722, 99.892367),
    (20.0525432, 99.8922973), (20.0524128, 99.8922423), (20.0522484, 99.8921459),
    (20.0520554, 99.891986), (20.0517808, 99.891755), (20.0515781, 99.8915859),
    (20.0510214, 99.8912703), (20.0508656, 99.8911985), (20.0507811, 99.8911678),
    (20.0506111, 99.8911174), (20.0504197, 99.8910882), (20.0501086, 99.8910858),
    (20.0498053, 99.891089), (20.0496038, 99.8911119), (20.0493906, 99.8911608),
    (20.0491683, 99.8912209), (20.048963, 99.8913104), (20.0488773, 99.8913592),
    (20.0488828, 99.8914971), (20.0487638, 99.8917959), (20.0483837, 99.8926419),
    (20.0482148, 99.8930229), (20.048174, 99.8931777), (20.0480829, 99.8932677),
    (20.0480069, 99.8929921), (20.0474814, 99.8931788), (20.0472262, 99.8930518),
    (20.0478682, 99.8929353), (20.0481098, 99.8929922), (20.0482137, 99.8929819),
    (20.0483744, 99.8926391), (20.0487557, 99.8917927), (20.0488731, 99.8914955),
    (20.0488701, 99.8913636), (20.0485134, 99.8915811), (20.0483635, 99.8916736),
    (20.048277, 99.8917428), (20.0480538, 99.8919394), (20.0478905, 99.8920593),
    (20.0477889, 99.8921119), (20.0475088, 99.8921777), (20.0473112, 99.8921947),
    (20.0468359, 99.8921076), (20.0466459, 99.8920038), (20.0462317, 99.8917914),
    (20.0459942, 99.8916797), (20.0457743, 99.8915592), (20.0454988, 99.8914141),
    (20.0453126, 99.8913307), (20.0451397, 99.8913095), (20.0447601, 99.8913119),
    (20.0444026, 99.891434), (20.0442243, 99.8916175), (20.0442208, 99.89196),
    (20.0441321, 99.8926272), (20.0441098, 99.8928826), (20.0440683, 99.8930463),
    (20.0438959, 99.8934262), (20.0436854, 99.8939553), (20.0436697, 99.894098),
    (20.0436659, 99.8942996), (20.0437399, 99.8945951), (20.0438845, 99.8948917),
    (20.0439097, 99.8953155), (20.0438139, 99.8956119), (20.0436256, 99.8958459),
    (20.0434757, 99.8961175), (20.0434593, 99.8962389), (20.0435545, 99.8963951),
    (20.0434244, 99.8965611), (20.0432867, 99.8966475), (20.0431047, 99.8966429),
    (20.0429812, 99.8965172), (20.0429591, 99.8962633), (20.0430883, 99.8957219),
    (20.0433418, 99.8952759), (20.0434291, 99.8949686), (20.0434379, 99.8948374),
    (20.0435716, 99.8943687), (20.0436495, 99.8942091), (20.0436631, 99.8940131),
    (20.0437089, 99.8938177), (20.0440777, 99.8929796), (20.0440994, 99.8928541),
    (20.0441641, 99.892329), (20.0442095, 99.8918253), (20.0442241, 99.8915146),
    (20.0441894, 99.8913807), (20.0447384, 99.8911876), (20.0450994, 99.8911848),
    (20.0454387, 99.8912766), (20.0456496, 99.8913485), (20.046094, 99.8916081),
    (20.0464981, 99.8919067), (20.0467636, 99.8920671), (20.0470613, 99.8921615),
    (20.0474083, 99.8921742), (20.0476294, 99.8921464), (20.0478355, 99.8920791),
    (20.0479747, 99.8919929), (20.0480823, 99.8919008), (20.0482981, 99.8917121),
    (20.0484177, 99.8916277), (20.0486601, 99.8914812), (20.048965, 99.8912989),
    (20.0491672, 99.891213), (20.0494899, 99.8911295), (20.0496934, 99.8910957),
    (20.0499015, 99.8910759), (20.0503165, 99.8910777), (20.0505258, 99.891083),
    (20.0510115, 99.8912496), (20.0513753, 99.8914568), (20.0517806, 99.8917387),
    (20.0523178, 99.8921751), (20.0524206, 99.8922322), (20.0526852, 99.8923437),
    (20.0530252, 99.8924426), (20.0536142, 99.8926818), (20.0539847, 99.8929921),
    (20.0541946, 99.8932597), (20.0544146, 99.8935988), (20.0545584, 99.8939365),
    (20.0548677, 99.894832), (20.0550159, 99.8951847), (20.0550785, 99.8954484),
    (20.0550706, 99.8958159), (20.0550704, 99.8959905), (20.0551356, 99.8961715),
    (20.0551902, 99.8962517), (20.0552935, 99.8963253), (20.0555114, 99.8963909),
    (20.0556462, 99.8964082), (20.0560645, 99.896436), (20.0563388, 99.8964788),
    (20.0565733, 99.8965736), (20.0568733, 99.8967472), (20.0577513, 99.8972588),
    (20.0581589, 99.8975592), (20.0583456, 99.8977335), (20.0587598, 99.8982991),
    (20.0588697, 99.8985018), (20.059008, 99.8988345), (20.0590993, 99.8991899),
    (20.0591296, 99.8995896), (20.058957, 99.8996017),
];

const BUS_STOPS: [(f64, f64); 22] = [
    (20.058752, 99.898396),
    (20.057039, 99.896930),
    (20.054683, 99.894515),
    (20.052544, 99.892316),
    (20.050816843021277, 99.89121969349162),
    (20.049137353450433, 99.891250485570452),
    (20.048193, 99.893221),
    (20.047264832318994, 99.89314563095694),
    (20.045503, 99.891442),
    (20.043881444753783, 99.89348617576454),
    (20.043919609786567, 99.89490923095694),
    (20.043311336533844, 99.89529707515575),
    (20.043845538331563, 99.8934754469289),
    (20.045659393241642, 99.89133178188165),
    (20.049391118491396, 99.89111283095696),
    (20.05083048583872, 99.89115650886787),
    (20.052689636083315, 99.89234180090831),
    (20.05473222049373, 99.89448019896511),
    (20.056897650552507, 99.89711855304603),
    (20.05806378447924, 99.89787541746388),
    (20.058966957817436, 99.8995173298247),
    (20.041244, 99.894427),
];

/// (id, km/h, update interval in seconds)
const VEHICLES: [(&str, f64, i64); 5] = [
    ("BUS-01", 30.0, 4),
    ("BUS-02", 28.0, 4),
    ("SHUTTLE-01", 25.0, 3),
    ("EXPRESS-01", 40.0, 4),
    ("VAN-01", 32.0, 4),
];

const DWELL: SignedDuration = SignedDuration::from_secs(10);

pub fn route() -> Route {
    WAYPOINTS.into_iter().map(Coordinate::from).collect()
}

pub fn stops() -> StopSet {
    BUS_STOPS.into_iter().map(Coordinate::from).collect()
}

/// The five vehicles of the Mae Chan line, all sharing one route and stop set.
pub fn fleet(should_loop: bool) -> Result<FleetDefinition, anyhow::Error> {
    let route = Arc::new(route());
    let stops = Arc::new(stops());

    let vehicles = VEHICLES
        .into_iter()
        .map(|(vehicle_id, speed, update_interval)| {
            let mut builder = VehicleConfigBuilder::default();
            builder
                .set_vehicle_id(vehicle_id)
                .set_route(Arc::clone(&route))
                .set_stops(Arc::clone(&stops))
                .set_speed(Kmh::new(speed))
                .set_update_interval(SignedDuration::from_secs(update_interval))
                .set_dwell(DWELL)
                .set_should_loop(should_loop);
            builder.build()
        })
        .collect::<Result<Vec<VehicleConfig>, _>>()?;

    Ok(FleetDefinition {
        routes: vec![NamedRoute {
            name: String::from(ROUTE_NAME),
            route,
            stops,
        }],
        vehicles,
    })
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;

    use super::*;

    #[test]
    fn test_route_data() {
        let route = route();
        assert_eq!(route.len(), 191);
        assert_eq!(stops().len(), 22);

        let first = route.first().unwrap();
        assert_eq!(first.lat(), 20.0589569);
        assert_eq!(first.lon(), 99.8997827);

        // A few kilometres through town and back.
        let total = route.total_distance().value();
        assert!(total > 2.0 && total < 10.0, "{total}");
    }

    #[test]
    fn test_fleet() {
        let fleet = fleet(true).unwrap();
        let ids = fleet
            .vehicles
            .iter()
            .map(|vehicle| vehicle.vehicle_id())
            .collect::<FxHashSet<_>>();

        assert_eq!(fleet.vehicles.len(), 5);
        assert_eq!(ids.len(), 5);
        assert!(fleet.vehicles.iter().all(|vehicle| vehicle.should_loop()));
        assert!(fleet.vehicles.iter().all(|vehicle| vehicle.dwell() == DWELL));
        assert_eq!(fleet.vehicles[3].speed(), Kmh::new(40.0));

        assert!(super::fleet(false).unwrap().vehicles.iter().all(|vehicle| !vehicle.should_loop()));
    }
}
